//! Logging utilities
//!
//! Standardized log lines for the load and aggregation stages.

pub mod log;

pub use self::log::{log_operation_complete, log_operation_start, log_skipped_rows};
