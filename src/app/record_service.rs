//! The record service: one storage handle, one lock table, and the two
//! sub-surfaces that share them.

use crate::app::business_registry::BusinessRegistry;
use crate::app::review_ledger::ReviewLedger;
use crate::infra::config::Config;
use crate::infra::locks::KeyedLocks;
use crate::storage::{EntityStore, InMemoryStore, PostgresStore, StoreResult};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn EntityStore>,
    pub businesses: BusinessRegistry,
    pub reviews: ReviewLedger,
}

impl RecordService {
    /// Wires the registry and ledger to an explicitly supplied store.
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        let locks = Arc::new(KeyedLocks::new());
        let businesses = BusinessRegistry::new(store.clone(), locks);
        let reviews = ReviewLedger::new(store.clone(), businesses.clone());
        Self {
            store,
            businesses,
            reviews,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }

    /// Picks the store from configuration: Postgres when `DATABASE_URL` is
    /// set, otherwise the in-memory store.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        match config.database_url.as_deref() {
            Some(url) => {
                let store = PostgresStore::connect(url, config.db_max_connections).await?;
                info!(
                    max_connections = config.db_max_connections,
                    "connected to Postgres entity store"
                );
                Ok(Self::new(Arc::new(store)))
            }
            None => {
                warn!("DATABASE_URL not set; records are kept in memory and lost on exit");
                Ok(Self::in_memory())
            }
        }
    }

    pub async fn health_check(&self) -> StoreResult<()> {
        self.store.health_check().await
    }
}
