//! Row types flowing through the pipeline

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, FieldRef, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendsError};
use crate::models::Gender;

/// A row as read from the source file, every field still text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line in the source file
    pub line: usize,
    /// Gender code, `1` or `2` in a well-formed file
    pub gender_code: String,
    /// First name, possibly empty or the rare-names placeholder
    pub name: String,
    /// Birth year, possibly malformed
    pub year: String,
    /// Number of births
    pub count: String,
}

impl RawRecord {
    /// Create a raw record with no source line
    pub fn new(
        gender_code: impl Into<String>,
        name: impl Into<String>,
        year: impl Into<String>,
        count: impl Into<String>,
    ) -> Self {
        Self {
            line: 0,
            gender_code: gender_code.into(),
            name: name.into(),
            year: year.into(),
            count: count.into(),
        }
    }

    /// Attach the source line
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// A cleaned row with typed fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub gender: Gender,
    /// Upper-cased first name
    pub name: String,
    pub year: i32,
    pub count: u64,
}

/// One name's share of the births of its gender in one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AggregatedRecord {
    /// Upper-cased first name
    pub name: String,
    /// Birth year
    pub year: i32,
    /// Gender of the counted births
    pub gender: Gender,
    /// Births with this name
    pub count: u64,
    /// Births of this gender in this year, all names
    #[serde(rename = "Total_Count")]
    pub total_count: u64,
    /// `100 * count / total_count`
    pub percentage: f64,
}

impl AggregatedRecord {
    /// Arrow schema of an exported selection
    #[must_use]
    pub fn schema() -> Schema {
        Schema::new(vec![
            Field::new("Name", DataType::Utf8, false),
            Field::new("Year", DataType::Int32, false),
            Field::new("Gender", DataType::Utf8, false),
            Field::new("Count", DataType::UInt64, false),
            Field::new("Total_Count", DataType::UInt64, false),
            Field::new("Percentage", DataType::Float64, false),
        ])
    }

    /// Convert a selection of rows to a `RecordBatch`
    pub fn to_record_batch<R>(rows: &[R]) -> Result<RecordBatch>
    where
        R: std::borrow::Borrow<Self> + Serialize,
    {
        let fields: Vec<FieldRef> = Self::schema()
            .fields()
            .iter()
            .map(Arc::clone)
            .collect();

        serde_arrow::to_record_batch(&fields, &rows)
            .map_err(|e| TrendsError::Export(e.to_string()))
    }

    /// Convert a `RecordBatch` produced by [`Self::to_record_batch`] back to rows
    pub fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        serde_arrow::from_record_batch(batch).map_err(|e| TrendsError::Export(e.to_string()))
    }
}
