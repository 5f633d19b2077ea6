use crate::domain::error::RecordError;
use crate::domain::model::{Business, BusinessPayload};
use crate::transport::http::handlers::common::{json_body, parse_id};
use crate::transport::http::types::{AppState, ErrorBody};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    post,
    path = "/businesses",
    request_body = BusinessPayload,
    responses(
        (status = 201, description = "Business created", body = Business),
        (status = 400, description = "Missing attribute or malformed body", body = ErrorBody)
    )
)]
pub async fn create_business_handler(
    State(state): State<AppState>,
    body: Result<Json<BusinessPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Business>), RecordError> {
    let payload = json_body(body)?;
    let business = state.service.businesses.create(payload).await?;
    Ok((StatusCode::CREATED, Json(business)))
}

#[utoipa::path(
    get,
    path = "/businesses/{business_id}",
    params(("business_id" = i64, Path, description = "Business id")),
    responses(
        (status = 200, description = "Business found", body = Business),
        (status = 404, description = "No business with this id", body = ErrorBody)
    )
)]
pub async fn get_business_handler(
    State(state): State<AppState>,
    Path(business_id): Path<String>,
) -> Result<Json<Business>, RecordError> {
    let id = parse_id(&business_id, RecordError::BusinessNotFound)?;
    Ok(Json(state.service.businesses.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/businesses",
    responses((status = 200, description = "All businesses", body = [Business]))
)]
pub async fn list_businesses_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Business>>, RecordError> {
    Ok(Json(state.service.businesses.list().await?))
}

#[utoipa::path(
    put,
    path = "/businesses/{business_id}",
    params(("business_id" = i64, Path, description = "Business id")),
    request_body = BusinessPayload,
    responses(
        (status = 200, description = "Business replaced", body = Business),
        (status = 400, description = "Missing attribute or malformed body", body = ErrorBody),
        (status = 404, description = "No business with this id", body = ErrorBody)
    )
)]
pub async fn replace_business_handler(
    State(state): State<AppState>,
    Path(business_id): Path<String>,
    body: Result<Json<BusinessPayload>, JsonRejection>,
) -> Result<Json<Business>, RecordError> {
    let id = parse_id(&business_id, RecordError::BusinessNotFound)?;
    let payload = json_body(body)?;
    Ok(Json(state.service.businesses.replace(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/businesses/{business_id}",
    params(("business_id" = i64, Path, description = "Business id")),
    responses(
        (status = 204, description = "Business and its reviews deleted"),
        (status = 404, description = "No business with this id", body = ErrorBody)
    )
)]
pub async fn delete_business_handler(
    State(state): State<AppState>,
    Path(business_id): Path<String>,
) -> Result<StatusCode, RecordError> {
    let id = parse_id(&business_id, RecordError::BusinessNotFound)?;
    state.service.businesses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/owners/{owner_id}/businesses",
    params(("owner_id" = i64, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Businesses of this owner (possibly empty)", body = [Business]),
        (status = 400, description = "Owner id is not an integer", body = ErrorBody)
    )
)]
pub async fn list_owner_businesses_handler(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<Business>>, RecordError> {
    let owner_id = parse_id(&owner_id, RecordError::InvalidPathParam("owner_id"))?;
    Ok(Json(state.service.businesses.list_by_owner(owner_id).await?))
}
