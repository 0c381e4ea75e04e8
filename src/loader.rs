//! Loading and processing of a name dataset file
//!
//! [`process_file`] runs the whole pipeline without memoization;
//! [`get_processed_data`] serves the result through the process-wide cache.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::Lazy;

use crate::algorithm::trends::{aggregate, normalize};
use crate::cache::TrendCache;
use crate::config::DatasetConfig;
use crate::error::Result;
use crate::models::TrendTable;
use crate::reader::DelimitedReader;
use crate::utils::logging::{log_operation_complete, log_operation_start};

static PROCESSED_DATA: Lazy<TrendCache> = Lazy::new(TrendCache::default);

/// Read, normalize and aggregate the file at `path`
pub fn process_file(path: &Path, config: &DatasetConfig) -> Result<TrendTable> {
    log_operation_start("Processing", path);
    let start = Instant::now();

    let raw = DelimitedReader::new(config.clone()).read_records(path)?;
    let normalized = normalize(raw, config)?;
    let rows = aggregate(&normalized)?;

    log_operation_complete("aggregated", path, rows.len(), start.elapsed());
    Ok(TrendTable::new(path, rows))
}

/// Aggregated table for `file_identifier`, computed on first request and
/// served from the process-wide cache afterwards.
///
/// The cache is keyed by the identifier as given and does not look at the
/// file again once loaded: a file rewritten in place keeps serving its first
/// result. Use a [`TrendCache`] with [`crate::config::Freshness::ModifiedTime`]
/// when revalidation is needed.
pub fn get_processed_data(file_identifier: impl AsRef<Path>) -> Result<Arc<TrendTable>> {
    PROCESSED_DATA.get(file_identifier)
}

/// The cache behind [`get_processed_data`]
#[must_use]
pub fn processed_data_cache() -> &'static TrendCache {
    &PROCESSED_DATA
}
