//! Configuration for reading the name dataset and caching its aggregation.

use std::fmt;

use crate::models::Gender;

/// Placeholder the INSEE file uses for names too rare to report individually
pub const RARE_NAMES_SENTINEL: &str = "_PRENOMS_RARES";

/// Source code for male births
pub const MALE_CODE: i64 = 1;

/// Source code for female births
pub const FEMALE_CODE: i64 = 2;

/// Field separator of the INSEE national file
pub const DEFAULT_DELIMITER: u8 = b';';

/// Rows per Arrow batch when reading the source
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Number of distinct files the default cache keeps
pub const DEFAULT_CACHE_CAPACITY: usize = 4;

/// How the first line of the source is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderPolicy {
    /// Treat the first line as a header when its first field is not an integer
    #[default]
    Auto,
    /// The first line is always a header
    Present,
    /// Every line is data
    Absent,
}

/// Encoding of the source dataset
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Field separator
    pub delimiter: u8,
    /// Header handling
    pub header: HeaderPolicy,
    /// Rows per Arrow batch, at least one
    batch_size: usize,
    /// Name value that stands for "rare names"; such rows are dropped
    pub rare_names_sentinel: String,
    /// Code mapped to `Gender::Male`
    pub male_code: i64,
    /// Code mapped to `Gender::Female`
    pub female_code: i64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            header: HeaderPolicy::Auto,
            batch_size: DEFAULT_BATCH_SIZE,
            rare_names_sentinel: RARE_NAMES_SENTINEL.to_string(),
            male_code: MALE_CODE,
            female_code: FEMALE_CODE,
        }
    }
}

impl DatasetConfig {
    /// Set the field separator
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the header policy
    #[must_use]
    pub fn with_header(mut self, header: HeaderPolicy) -> Self {
        self.header = header;
        self
    }

    /// Set the rows per Arrow batch; values below one are raised to one
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Set the rare-names placeholder
    #[must_use]
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.rare_names_sentinel = sentinel.into();
        self
    }

    /// Map a raw gender code to a gender, if it is one of the configured codes
    #[must_use]
    pub fn gender_for_code(&self, code: &str) -> Option<Gender> {
        let code: i64 = code.trim().parse().ok()?;
        if code == self.male_code {
            Some(Gender::Male)
        } else if code == self.female_code {
            Some(Gender::Female)
        } else {
            None
        }
    }
}

impl fmt::Display for DatasetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset Configuration:")?;
        writeln!(f, "  Delimiter: {:?}", char::from(self.delimiter))?;
        writeln!(f, "  Header: {:?}", self.header)?;
        writeln!(f, "  Batch Size: {}", self.batch_size)?;
        writeln!(f, "  Rare Names Sentinel: {}", self.rare_names_sentinel)?;
        writeln!(f, "  Male Code: {}", self.male_code)?;
        writeln!(f, "  Female Code: {}", self.female_code)
    }
}

/// When a cached table is considered out of date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Freshness {
    /// Never revalidate. A file rewritten after its first load keeps serving
    /// the table computed from the old contents until it is invalidated.
    #[default]
    IdentifierOnly,
    /// Recompute when the file's modification time differs from the one
    /// recorded at load.
    ModifiedTime,
}

/// Configuration for the processed-data cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of identifiers held; least recently used is evicted first
    pub capacity: usize,
    /// Revalidation policy
    pub freshness: Freshness,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            freshness: Freshness::IdentifierOnly,
        }
    }
}

impl CacheConfig {
    /// Set the capacity; values below one are raised to one
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Set the freshness policy
    #[must_use]
    pub fn with_freshness(mut self, freshness: Freshness) -> Self {
        self.freshness = freshness;
        self
    }
}

impl fmt::Display for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cache Configuration:")?;
        writeln!(f, "  Capacity: {}", self.capacity)?;
        writeln!(f, "  Freshness: {:?}", self.freshness)
    }
}
