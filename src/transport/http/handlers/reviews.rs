use crate::domain::error::RecordError;
use crate::domain::model::{Review, ReviewPayload};
use crate::transport::http::handlers::common::{json_body, parse_id};
use crate::transport::http::types::{AppState, ErrorBody};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    post,
    path = "/reviews",
    request_body = ReviewPayload,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Missing attribute or malformed body", body = ErrorBody),
        (status = 404, description = "No business with this business_id", body = ErrorBody),
        (status = 409, description = "User already reviewed this business", body = ErrorBody)
    )
)]
pub async fn create_review_handler(
    State(state): State<AppState>,
    body: Result<Json<ReviewPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>), RecordError> {
    let payload = json_body(body)?;
    let review = state.service.reviews.create(payload).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[utoipa::path(
    get,
    path = "/reviews/{review_id}",
    params(("review_id" = i64, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review found", body = Review),
        (status = 404, description = "No review with this id", body = ErrorBody)
    )
)]
pub async fn get_review_handler(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<Json<Review>, RecordError> {
    let id = parse_id(&review_id, RecordError::ReviewNotFound)?;
    Ok(Json(state.service.reviews.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/reviews/{review_id}",
    params(("review_id" = i64, Path, description = "Review id")),
    request_body = ReviewPayload,
    responses(
        (status = 200, description = "Review updated (omitted review_text is kept)", body = Review),
        (status = 400, description = "Missing stars or malformed body", body = ErrorBody),
        (status = 404, description = "No review with this id", body = ErrorBody)
    )
)]
pub async fn replace_review_handler(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    body: Result<Json<ReviewPayload>, JsonRejection>,
) -> Result<Json<Review>, RecordError> {
    let id = parse_id(&review_id, RecordError::ReviewNotFound)?;
    let payload = json_body(body)?;
    Ok(Json(state.service.reviews.replace(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/reviews/{review_id}",
    params(("review_id" = i64, Path, description = "Review id")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "No review with this id", body = ErrorBody)
    )
)]
pub async fn delete_review_handler(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<StatusCode, RecordError> {
    let id = parse_id(&review_id, RecordError::ReviewNotFound)?;
    state.service.reviews.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/reviews",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Reviews by this user (possibly empty)", body = [Review]),
        (status = 400, description = "User id is not an integer", body = ErrorBody)
    )
)]
pub async fn list_user_reviews_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Review>>, RecordError> {
    let user_id = parse_id(&user_id, RecordError::InvalidPathParam("user_id"))?;
    Ok(Json(state.service.reviews.list_by_user(user_id).await?))
}
