//! Gender, name and year filters and the query combining them

use std::ops::RangeInclusive;

use rustc_hash::FxHashSet;

use crate::filter::RowFilter;
use crate::models::{AggregatedRecord, Gender};

/// Accepts rows of one gender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenderFilter {
    pub gender: Gender,
}

impl RowFilter for GenderFilter {
    fn matches(&self, row: &AggregatedRecord) -> bool {
        row.gender == self.gender
    }
}

/// Accepts rows whose name is in a set.
///
/// Names are upper-cased on insertion, matching the normalized table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSetFilter {
    names: FxHashSet<String>,
}

impl NameSetFilter {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.as_ref().trim().to_uppercase())
                .collect(),
        }
    }

    pub fn insert(&mut self, name: &str) {
        self.names.insert(name.trim().to_uppercase());
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl RowFilter for NameSetFilter {
    fn matches(&self, row: &AggregatedRecord) -> bool {
        self.names.contains(&row.name)
    }
}

/// Accepts rows whose year lies in an inclusive range; an inverted range accepts nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRangeFilter {
    pub years: RangeInclusive<i32>,
}

impl YearRangeFilter {
    #[must_use]
    pub fn new(lo: i32, hi: i32) -> Self {
        Self { years: lo..=hi }
    }
}

impl Default for YearRangeFilter {
    fn default() -> Self {
        Self {
            years: i32::MIN..=i32::MAX,
        }
    }
}

impl RowFilter for YearRangeFilter {
    fn matches(&self, row: &AggregatedRecord) -> bool {
        self.years.contains(&row.year)
    }
}

/// The selection the presentation layer charts, summarizes and exports:
/// one gender, a set of names and an inclusive year range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendQuery {
    gender: GenderFilter,
    names: NameSetFilter,
    years: YearRangeFilter,
}

impl TrendQuery {
    /// A query for `gender` with no names selected and no year bound
    #[must_use]
    pub fn new(gender: Gender) -> Self {
        Self {
            gender: GenderFilter { gender },
            names: NameSetFilter::default(),
            years: YearRangeFilter::default(),
        }
    }

    /// Replace the selected names
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names = NameSetFilter::new(names);
        self
    }

    /// Add one name to the selection
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.names.insert(name);
        self
    }

    /// Restrict to years in `lo..=hi`
    #[must_use]
    pub fn with_years(mut self, lo: i32, hi: i32) -> Self {
        self.years = YearRangeFilter::new(lo, hi);
        self
    }

    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender.gender
    }

    #[must_use]
    pub fn years(&self) -> &RangeInclusive<i32> {
        &self.years.years
    }

    #[must_use]
    pub fn names(&self) -> &NameSetFilter {
        &self.names
    }
}

impl RowFilter for TrendQuery {
    fn matches(&self, row: &AggregatedRecord) -> bool {
        self.gender.matches(row) && self.names.matches(row) && self.years.matches(row)
    }
}
