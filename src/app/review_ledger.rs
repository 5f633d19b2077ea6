//! The review ledger.
//!
//! Enforces that a review references an existing business when it is
//! created, that a user holds at most one review per business, and the
//! partial-update rule for review edits.

use crate::app::business_registry::BusinessRegistry;
use crate::domain::error::{RecordError, RecordResult};
use crate::domain::model::{from_properties, to_properties, Review, ReviewFields, ReviewPayload};
use crate::storage::{EntityId, EntityKind, EntityStore, StoreError, REVIEW_UNIQUE_CONSTRAINT};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct ReviewLedger {
    store: Arc<dyn EntityStore>,
    businesses: BusinessRegistry,
}

impl ReviewLedger {
    pub fn new(store: Arc<dyn EntityStore>, businesses: BusinessRegistry) -> Self {
        Self { store, businesses }
    }

    /// Creates a review after checking, in order, that the business exists and
    /// that the user has not reviewed it yet.
    ///
    /// Both checks and the write run under the business's lock, which is also
    /// held by a business delete, so the checks cannot go stale before the put.
    pub async fn create(&self, payload: ReviewPayload) -> RecordResult<Review> {
        let fields = payload.validate_create()?;

        let _guard = self.businesses.lock(fields.business_id).await;
        if !self.businesses.exists(fields.business_id).await? {
            debug!(
                business_id = fields.business_id,
                "review rejected: no such business"
            );
            return Err(RecordError::BusinessNotFound);
        }

        let existing = self
            .store
            .query_equal(
                EntityKind::Review,
                &[
                    ("user_id", json!(fields.user_id)),
                    ("business_id", json!(fields.business_id)),
                ],
            )
            .await?;
        if !existing.is_empty() {
            debug!(
                user_id = fields.user_id,
                business_id = fields.business_id,
                "review rejected: already reviewed"
            );
            return Err(RecordError::AlreadyReviewed);
        }

        let id = self
            .store
            .put(EntityKind::Review, None, to_properties(&fields)?)
            .await
            .map_err(|e| match e {
                // Another process won the race; the store's constraint caught it.
                StoreError::UniqueViolation(constraint)
                    if constraint == REVIEW_UNIQUE_CONSTRAINT =>
                {
                    warn!(%constraint, "review uniqueness enforced by the store");
                    RecordError::AlreadyReviewed
                }
                other => other.into(),
            })?;

        info!(
            review_id = id,
            user_id = fields.user_id,
            business_id = fields.business_id,
            "review created"
        );
        Ok(Review::new(id, fields))
    }

    pub async fn get(&self, id: EntityId) -> RecordResult<Review> {
        let fields = self.find(id).await?.ok_or(RecordError::ReviewNotFound)?;
        Ok(Review::new(id, fields))
    }

    async fn find(&self, id: EntityId) -> RecordResult<Option<ReviewFields>> {
        self.store
            .get(EntityKind::Review, id)
            .await?
            .map(|entity| from_properties(entity.properties))
            .transpose()
    }

    /// Looks the review up, takes its business's lock, and re-reads it so the
    /// caller acts on a review that a concurrent cascade cannot remove.
    async fn lock_review(&self, id: EntityId) -> RecordResult<(OwnedMutexGuard<()>, ReviewFields)> {
        let fields = self.find(id).await?.ok_or(RecordError::ReviewNotFound)?;
        let guard = self.businesses.lock(fields.business_id).await;
        let fields = self.find(id).await?.ok_or(RecordError::ReviewNotFound)?;
        Ok((guard, fields))
    }

    /// Partial update: `stars` is required and always written, `review_text`
    /// is written only when supplied. `user_id` and `business_id` never change.
    pub async fn replace(&self, id: EntityId, payload: ReviewPayload) -> RecordResult<Review> {
        let update = payload.validate_update()?;

        let (_guard, mut fields) = self.lock_review(id).await?;
        update.apply(&mut fields);
        self.store
            .put(EntityKind::Review, Some(id), to_properties(&fields)?)
            .await?;

        info!(review_id = id, stars = %fields.stars, "review updated");
        Ok(Review::new(id, fields))
    }

    pub async fn delete(&self, id: EntityId) -> RecordResult<()> {
        let (_guard, fields) = self.lock_review(id).await?;
        self.store.delete(EntityKind::Review, id).await?;
        info!(
            review_id = id,
            business_id = fields.business_id,
            "review deleted"
        );
        Ok(())
    }

    pub async fn list_by_user(&self, user_id: i64) -> RecordResult<Vec<Review>> {
        self.store
            .query_equal(EntityKind::Review, &[("user_id", json!(user_id))])
            .await?
            .into_iter()
            .map(Review::from_stored)
            .collect()
    }
}
