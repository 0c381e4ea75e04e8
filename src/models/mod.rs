//! Data models for the name dataset
//!
//! Raw, normalized and aggregated rows, plus the immutable table the
//! presentation layer queries.

pub mod record;
pub mod table;
pub mod types;

pub use record::{AggregatedRecord, NormalizedRecord, RawRecord};
pub use table::TrendTable;
pub use types::Gender;
