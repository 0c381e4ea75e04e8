//! Error handling for the trend pipeline.

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;

use crate::models::Gender;

/// Specialized error type for loading and aggregating name data
#[derive(Debug, thiserror::Error)]
pub enum TrendsError {
    /// The source file could not be opened or read
    #[error("Data source unavailable: {}: {source}", .path.display())]
    DataSourceUnavailable {
        /// Identifier of the file that was requested
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: io::Error,
    },

    /// The source could be opened but is not a well-formed delimited file
    #[error("Malformed source: {0}")]
    MalformedSource(#[from] ArrowError),

    /// A gender code other than the two the dataset defines
    #[error("Invalid gender code {code:?} on line {line}")]
    InvalidGenderCode {
        /// Raw code as read
        code: String,
        /// 1-based line in the source file
        line: usize,
    },

    /// A count that is not a non-negative integer
    #[error("Invalid count {value:?} on line {line}")]
    InvalidCount {
        /// Raw count as read
        value: String,
        /// 1-based line in the source file
        line: usize,
    },

    /// A per-name group found no matching per-year total
    #[error("No total for {name} in {year} ({gender})")]
    JoinInvariant {
        /// Name of the orphaned group
        name: String,
        /// Year of the orphaned group
        year: i32,
        /// Gender of the orphaned group
        gender: Gender,
    },

    /// A per-year total of zero births
    #[error("Total births for {year} ({gender}) is zero")]
    DivisionByZero {
        /// Year of the empty group
        year: i32,
        /// Gender of the empty group
        gender: Gender,
    },

    /// Summed births for a (year, gender) group exceed the count type
    #[error("Birth counts for {year} ({gender}) overflow")]
    CountOverflow {
        /// Year of the overflowing group
        year: i32,
        /// Gender of the overflowing group
        gender: Gender,
    },

    /// Converting rows to an Arrow batch failed
    #[error("Export error: {0}")]
    Export(String),
}

impl TrendsError {
    /// Create a data source error for the given path
    pub fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DataSourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Whether this error indicates a defect in the pipeline rather than in the input
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::JoinInvariant { .. } | Self::DivisionByZero { .. })
    }
}

/// Result type for trend pipeline operations
pub type Result<T> = std::result::Result<T, TrendsError>;
