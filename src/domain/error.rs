//! Failure contract shared by the business registry and the review ledger.

use crate::storage::StoreError;
use thiserror::Error;

/// Coarse classification of a `RecordError`; the transport maps it to a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Storage,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("The request body is missing at least one of the required attributes")]
    MissingAttributes,
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("Path parameter {0} must be an integer")]
    InvalidPathParam(&'static str),
    #[error("No business with this business_id exists")]
    BusinessNotFound,
    #[error("No review with this review_id exists")]
    ReviewNotFound,
    #[error("You have already submitted a review for this business. You can update your previous review, or delete it and submit a new review")]
    AlreadyReviewed,
    #[error("Storage failure: {0}")]
    Storage(anyhow::Error),
}

impl RecordError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::MissingAttributes
            | RecordError::InvalidBody(_)
            | RecordError::InvalidPathParam(_) => ErrorKind::Validation,
            RecordError::BusinessNotFound | RecordError::ReviewNotFound => ErrorKind::NotFound,
            RecordError::AlreadyReviewed => ErrorKind::Conflict,
            RecordError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<StoreError> for RecordError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Backend(e) => RecordError::Storage(e),
            // Callers that know which constraint was hit map it themselves.
            other @ StoreError::UniqueViolation(_) => RecordError::Storage(other.into()),
        }
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::Storage(anyhow::anyhow!("malformed stored entity: {}", err))
    }
}

pub type RecordResult<T> = Result<T, RecordError>;
