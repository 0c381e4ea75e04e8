//! The aggregated result table and its read-only views

use std::path::{Path, PathBuf};

use itertools::{Itertools, MinMaxResult};

use crate::filter::{RowFilter, TrendQuery};
use crate::models::{AggregatedRecord, Gender};

/// Aggregated rows of one source file, sorted by (name, gender, year).
///
/// Built once per file and never mutated; queries hand out borrowed slices.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendTable {
    source: PathBuf,
    rows: Vec<AggregatedRecord>,
}

impl TrendTable {
    /// Wrap rows produced by [`crate::algorithm::trends::aggregate`]
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, rows: Vec<AggregatedRecord>) -> Self {
        Self {
            source: source.into(),
            rows,
        }
    }

    /// Identifier of the file the table was computed from
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    #[must_use]
    pub fn rows(&self) -> &[AggregatedRecord] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct names given to children of `gender`, ascending
    #[must_use]
    pub fn names_for(&self, gender: Gender) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.gender == gender)
            .map(|row| row.name.as_str())
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// Earliest and latest year present in the table
    #[must_use]
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        match self.rows.iter().map(|row| row.year).minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(year) => Some((year, year)),
            MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
        }
    }

    /// Rows matching the query's gender, name set and year range, in table order
    #[must_use]
    pub fn select(&self, query: &TrendQuery) -> Vec<&AggregatedRecord> {
        self.filter(query)
    }

    /// Rows accepted by an arbitrary row filter, in table order
    #[must_use]
    pub fn filter<F>(&self, filter: &F) -> Vec<&AggregatedRecord>
    where
        F: RowFilter + ?Sized,
    {
        self.rows.iter().filter(|row| filter.matches(row)).collect()
    }
}
