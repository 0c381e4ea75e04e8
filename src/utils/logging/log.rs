//! Logging utilities
//!
//! Shared log lines for file operations and pipeline stages.

use std::path::Path;
use std::time::Duration;

/// Log the start of an operation on a file
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{operation} {}", path.display());
}

/// Log the end of an operation with its item count and duration
pub fn log_operation_complete(operation: &str, path: &Path, items: usize, elapsed: Duration) {
    log::info!(
        "Successfully {operation} {items} items from {} in {elapsed:?}",
        path.display()
    );
}

/// Log rows a stage skipped, one line per non-zero reason
///
/// # Arguments
/// * `stage` - Name of the stage that skipped the rows
/// * `skipped` - Pairs of reason and row count
pub fn log_skipped_rows(stage: &str, skipped: &[(&str, usize)]) {
    for (reason, count) in skipped.iter().filter(|(_, count)| *count > 0) {
        log::debug!("{stage}: skipped {count} rows ({reason})");
    }
}
