use crate::domain::error::{ErrorKind, RecordError};
use crate::transport::http::types::ErrorBody;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for RecordError {
    fn into_response(self) -> Response {
        let status = status_for(self.kind());
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        } else {
            debug!(%status, error = %self, "request rejected");
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

/// Unwraps a JSON body, turning extractor rejections (bad syntax, wrong
/// content type, wrongly typed attributes) into validation failures.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, RecordError> {
    body.map(|Json(v)| v)
        .map_err(|rejection| RecordError::InvalidBody(rejection.body_text()))
}

/// Parses an integer path segment, reporting `otherwise` when it is not one.
pub fn parse_id(raw: &str, otherwise: RecordError) -> Result<i64, RecordError> {
    raw.trim().parse::<i64>().map_err(|_| otherwise)
}
