//! The business registry.
//!
//! Owns validation of business records and the cascade that removes a
//! business's reviews before the business itself.

use crate::domain::error::{RecordError, RecordResult};
use crate::domain::model::{to_properties, Business, BusinessPayload};
use crate::infra::locks::KeyedLocks;
use crate::storage::{EntityId, EntityKind, EntityStore};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info};

/// Lock key shared by every write whose outcome depends on a business and its reviews.
pub(crate) fn business_lock_key(business_id: EntityId) -> String {
    format!("business:{}", business_id)
}

#[derive(Clone)]
pub struct BusinessRegistry {
    store: Arc<dyn EntityStore>,
    locks: Arc<KeyedLocks>,
}

impl BusinessRegistry {
    pub fn new(store: Arc<dyn EntityStore>, locks: Arc<KeyedLocks>) -> Self {
        Self { store, locks }
    }

    pub(crate) async fn lock(&self, business_id: EntityId) -> OwnedMutexGuard<()> {
        self.locks.acquire(&business_lock_key(business_id)).await
    }

    /// Persists a new business. No duplicate detection across businesses.
    pub async fn create(&self, payload: BusinessPayload) -> RecordResult<Business> {
        let fields = payload.validate()?;
        let id = self
            .store
            .put(EntityKind::Business, None, to_properties(&fields)?)
            .await?;
        info!(business_id = id, owner_id = fields.owner_id, "business created");
        Ok(Business::new(id, fields))
    }

    pub async fn get(&self, id: EntityId) -> RecordResult<Business> {
        self.find(id).await?.ok_or(RecordError::BusinessNotFound)
    }

    pub async fn exists(&self, id: EntityId) -> RecordResult<bool> {
        Ok(self.store.get(EntityKind::Business, id).await?.is_some())
    }

    async fn find(&self, id: EntityId) -> RecordResult<Option<Business>> {
        self.store
            .get(EntityKind::Business, id)
            .await?
            .map(Business::from_stored)
            .transpose()
    }

    /// Every business, in whatever order the store enumerates them.
    pub async fn list(&self) -> RecordResult<Vec<Business>> {
        self.store
            .query_equal(EntityKind::Business, &[])
            .await?
            .into_iter()
            .map(Business::from_stored)
            .collect()
    }

    pub async fn list_by_owner(&self, owner_id: i64) -> RecordResult<Vec<Business>> {
        self.store
            .query_equal(EntityKind::Business, &[("owner_id", json!(owner_id))])
            .await?
            .into_iter()
            .map(Business::from_stored)
            .collect()
    }

    /// Full replacement: all six attributes must be supplied, every one is overwritten.
    pub async fn replace(&self, id: EntityId, payload: BusinessPayload) -> RecordResult<Business> {
        let fields = payload.validate()?;

        let _guard = self.lock(id).await;
        if !self.exists(id).await? {
            debug!(business_id = id, "replace rejected: no such business");
            return Err(RecordError::BusinessNotFound);
        }
        self.store
            .put(EntityKind::Business, Some(id), to_properties(&fields)?)
            .await?;
        info!(business_id = id, "business replaced");
        Ok(Business::new(id, fields))
    }

    /// Deletes a business and, before it, every review that references it.
    ///
    /// The sequence is not transactional: a failure part-way leaves the
    /// business in place with some of its reviews already gone, never the
    /// other way round. Returns the number of reviews removed.
    pub async fn delete(&self, id: EntityId) -> RecordResult<usize> {
        let _guard = self.lock(id).await;
        if !self.exists(id).await? {
            debug!(business_id = id, "delete rejected: no such business");
            return Err(RecordError::BusinessNotFound);
        }

        let reviews = self
            .store
            .query_equal(EntityKind::Review, &[("business_id", json!(id))])
            .await?;
        for review in &reviews {
            self.store.delete(EntityKind::Review, review.id).await?;
        }
        self.store.delete(EntityKind::Business, id).await?;

        info!(
            business_id = id,
            cascaded_reviews = reviews.len(),
            "business deleted"
        );
        Ok(reviews.len())
    }
}
