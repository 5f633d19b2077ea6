pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use store::{
    EntityId, EntityKind, EntityStore, Properties, StoreError, StoreResult, StoredEntity,
    REVIEW_UNIQUE_CONSTRAINT,
};
