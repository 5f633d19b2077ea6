pub mod error;
pub mod model;

pub use error::{ErrorKind, RecordError, RecordResult};
