//! InMemoryStore - HashMap-backed entity store for tests and local runs.

use crate::storage::store::{
    EntityId, EntityKind, EntityStore, Properties, StoreError, StoreResult, StoredEntity,
};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory entity store.
///
/// Entities are kept per kind in id order, so enumeration is ascending by id.
/// Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entities: Arc<RwLock<HashMap<EntityKind, BTreeMap<EntityId, Properties>>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> EntityId {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend(anyhow::anyhow!("in-memory store lock poisoned"))
}

fn matches_filters(properties: &Properties, filters: &[(&str, JsonValue)]) -> bool {
    filters
        .iter()
        .all(|(field, value)| properties.get(*field) == Some(value))
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn put(
        &self,
        kind: EntityKind,
        id: Option<EntityId>,
        properties: Properties,
    ) -> StoreResult<EntityId> {
        let id = match id {
            Some(id) => id,
            None => self.allocate_id(),
        };
        let mut entities = self.entities.write().map_err(|_| poisoned())?;
        entities.entry(kind).or_default().insert(id, properties);
        Ok(id)
    }

    async fn get(&self, kind: EntityKind, id: EntityId) -> StoreResult<Option<StoredEntity>> {
        let entities = self.entities.read().map_err(|_| poisoned())?;
        Ok(entities
            .get(&kind)
            .and_then(|by_id| by_id.get(&id))
            .map(|properties| StoredEntity {
                id,
                properties: properties.clone(),
            }))
    }

    async fn query_equal(
        &self,
        kind: EntityKind,
        filters: &[(&str, JsonValue)],
    ) -> StoreResult<Vec<StoredEntity>> {
        let entities = self.entities.read().map_err(|_| poisoned())?;
        let Some(by_id) = entities.get(&kind) else {
            return Ok(Vec::new());
        };
        Ok(by_id
            .iter()
            .filter(|(_, properties)| matches_filters(properties, filters))
            .map(|(id, properties)| StoredEntity {
                id: *id,
                properties: properties.clone(),
            })
            .collect())
    }

    async fn delete(&self, kind: EntityKind, id: EntityId) -> StoreResult<()> {
        let mut entities = self.entities.write().map_err(|_| poisoned())?;
        if let Some(by_id) = entities.get_mut(&kind) {
            by_id.remove(&id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: JsonValue) -> Properties {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn put_without_id_allocates_increasing_ids() {
        let store = InMemoryStore::new();
        let a = store
            .put(EntityKind::Business, None, props(json!({"name": "a"})))
            .await
            .unwrap();
        let b = store
            .put(EntityKind::Review, None, props(json!({"stars": 1})))
            .await
            .unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[tokio::test]
    async fn put_with_id_overwrites_properties() {
        let store = InMemoryStore::new();
        let id = store
            .put(EntityKind::Business, None, props(json!({"name": "old"})))
            .await
            .unwrap();
        store
            .put(EntityKind::Business, Some(id), props(json!({"name": "new"})))
            .await
            .unwrap();

        let stored = store.get(EntityKind::Business, id).await.unwrap().unwrap();
        assert_eq!(stored.properties, props(json!({"name": "new"})));
    }

    #[tokio::test]
    async fn kinds_are_isolated() {
        let store = InMemoryStore::new();
        let id = store
            .put(EntityKind::Business, None, props(json!({"name": "a"})))
            .await
            .unwrap();
        assert!(store.get(EntityKind::Review, id).await.unwrap().is_none());
        assert!(store
            .query_equal(EntityKind::Review, &[])
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn query_equal_applies_every_filter() {
        let store = InMemoryStore::new();
        for (user, business) in [(1, 10), (1, 11), (2, 10)] {
            store
                .put(
                    EntityKind::Review,
                    None,
                    props(json!({"user_id": user, "business_id": business})),
                )
                .await
                .unwrap();
        }

        let by_user = store
            .query_equal(EntityKind::Review, &[("user_id", json!(1))])
            .await
            .unwrap();
        assert_eq!(by_user.len(), 2);

        let pair = store
            .query_equal(
                EntityKind::Review,
                &[("user_id", json!(1)), ("business_id", json!(10))],
            )
            .await
            .unwrap();
        assert_eq!(pair.len(), 1);
        assert_eq!(pair[0].id, 1);

        let all = store.query_equal(EntityKind::Review, &[]).await.unwrap();
        assert_eq!(all.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryStore::new();
        let id = store
            .put(EntityKind::Business, None, props(json!({})))
            .await
            .unwrap();
        store.delete(EntityKind::Business, id).await.unwrap();
        store.delete(EntityKind::Business, id).await.unwrap();
        assert!(store.get(EntityKind::Business, id).await.unwrap().is_none());
    }
}
