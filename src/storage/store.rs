//! The storage collaborator contract.
//!
//! The record service never owns persistence; it reads and writes through an
//! `EntityStore`. Implementations only need key/value semantics plus
//! equality queries over top-level properties.

use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use thiserror::Error;

/// Identifier generated by the store when an entity is first written.
pub type EntityId = i64;

/// Stored properties of an entity (a JSON object without the id).
pub type Properties = Map<String, JsonValue>;

/// The two entity kinds held by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Business,
    Review,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Business => "Business",
            EntityKind::Review => "Review",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraint name a store reports when a second review for the same
/// (user_id, business_id) pair is refused.
pub const REVIEW_UNIQUE_CONSTRAINT: &str = "entities_review_user_business_key";

/// An entity as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntity {
    pub id: EntityId,
    pub properties: Properties,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store refused a write that would break one of its uniqueness constraints.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::UniqueViolation(constraint);
            }
        }
        StoreError::Backend(err.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Trait that defines the contract for any entity store.
///
/// A single handle (`Arc<dyn EntityStore>`) is shared by every request, so
/// implementations must be safe to call concurrently.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Writes an entity. With `id == None` a new id is generated and returned;
    /// otherwise the properties stored under `id` are replaced.
    async fn put(
        &self,
        kind: EntityKind,
        id: Option<EntityId>,
        properties: Properties,
    ) -> StoreResult<EntityId>;

    async fn get(&self, kind: EntityKind, id: EntityId) -> StoreResult<Option<StoredEntity>>;

    /// Returns every entity of `kind` whose properties equal all `filters`.
    /// An empty filter list enumerates the whole kind.
    async fn query_equal(
        &self,
        kind: EntityKind,
        filters: &[(&str, JsonValue)],
    ) -> StoreResult<Vec<StoredEntity>>;

    /// Removes an entity. Removing an absent id is not an error.
    async fn delete(&self, kind: EntityKind, id: EntityId) -> StoreResult<()>;

    /// Liveness check used by `/health`.
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
