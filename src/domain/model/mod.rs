//! Record definitions for businesses and reviews.
//!
//! Each kind has three shapes:
//! - a request payload where every attribute is optional, so that absence can
//!   be reported as a validation failure instead of a parse failure,
//! - the stored field set (what the entity store holds, without the id),
//! - the response record (id plus stored fields).

use crate::domain::error::{RecordError, RecordResult};
use crate::storage::Properties;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

pub mod business;
pub mod review;

pub use business::{Business, BusinessFields, BusinessPayload};
pub use review::{Review, ReviewFields, ReviewPayload, ReviewUpdate};

/// Serializes a field set into the property bag handed to the entity store.
pub(crate) fn to_properties<T: Serialize>(fields: &T) -> RecordResult<Properties> {
    match serde_json::to_value(fields)? {
        JsonValue::Object(map) => Ok(map),
        other => Err(RecordError::Storage(anyhow::anyhow!(
            "expected fields to serialize as an object, got {}",
            other
        ))),
    }
}

/// Reads a field set back out of a stored property bag.
pub(crate) fn from_properties<T: DeserializeOwned>(properties: Properties) -> RecordResult<T> {
    Ok(serde_json::from_value(JsonValue::Object(properties))?)
}

/// Presence check shared by the payload validators.
pub(crate) fn required<T>(value: Option<T>) -> RecordResult<T> {
    value.ok_or(RecordError::MissingAttributes)
}
