use crate::domain::model::{Business, BusinessPayload, Review, ReviewPayload};
use crate::transport::http::handlers::{businesses, health, reviews};
use crate::transport::http::types::{AppState, ErrorBody, HealthResponse};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        businesses::create_business_handler,
        businesses::get_business_handler,
        businesses::list_businesses_handler,
        businesses::replace_business_handler,
        businesses::delete_business_handler,
        businesses::list_owner_businesses_handler,
        reviews::create_review_handler,
        reviews::get_review_handler,
        reviews::replace_review_handler,
        reviews::delete_review_handler,
        reviews::list_user_reviews_handler
    ),
    components(schemas(
        Business,
        BusinessPayload,
        Review,
        ReviewPayload,
        ErrorBody,
        HealthResponse
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/businesses",
            get(businesses::list_businesses_handler).post(businesses::create_business_handler),
        )
        .route(
            "/businesses/:business_id",
            get(businesses::get_business_handler)
                .put(businesses::replace_business_handler)
                .delete(businesses::delete_business_handler),
        )
        .route(
            "/owners/:owner_id/businesses",
            get(businesses::list_owner_businesses_handler),
        )
        .route("/reviews", post(reviews::create_review_handler))
        .route(
            "/reviews/:review_id",
            get(reviews::get_review_handler)
                .put(reviews::replace_review_handler)
                .delete(reviews::delete_review_handler),
        )
        .route("/users/:user_id/reviews", get(reviews::list_user_reviews_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
