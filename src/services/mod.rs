//! Services for record storage, range derivation and aggregation

pub mod aggregator;
pub mod range;
pub mod store;

pub use aggregator::Aggregator;
pub use range::RangePolicy;
pub use store::{RecordStore, SqliteStore};
