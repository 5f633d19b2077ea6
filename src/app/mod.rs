pub mod business_registry;
pub mod record_service;
pub mod review_ledger;

pub use business_registry::BusinessRegistry;
pub use record_service::RecordService;
pub use review_ledger::ReviewLedger;
