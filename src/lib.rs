pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{BusinessRegistry, RecordService, ReviewLedger};
pub use domain::model::{Business, BusinessPayload, Review, ReviewPayload};
pub use domain::{ErrorKind, RecordError, RecordResult};
pub use infra::Config;
pub use storage::{EntityStore, InMemoryStore, PostgresStore};
