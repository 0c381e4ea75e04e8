//! A Rust library for turning the INSEE first-name file into per-name
//! percentages of annual births, with cached loading, filtered views and
//! per-name summary statistics.

pub mod algorithm;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod reader;
pub mod utils;

// Core types
pub use config::{CacheConfig, DatasetConfig, Freshness, HeaderPolicy};
pub use error::{Result, TrendsError};
pub use models::{AggregatedRecord, Gender, NormalizedRecord, RawRecord, TrendTable};

// Pipeline
pub use algorithm::trends::{NameSummary, TrendStatistics, YearShare, aggregate, normalize};
pub use cache::TrendCache;
pub use loader::{get_processed_data, process_file};
pub use reader::DelimitedReader;

// Filtering capabilities
pub use filter::{RowFilter, TrendQuery};

// Arrow types
pub use arrow::record_batch::RecordBatch;
