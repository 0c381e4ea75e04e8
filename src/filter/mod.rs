//! Row filtering for aggregated tables
//!
//! This module defines the [`RowFilter`] trait used to slice a
//! [`crate::models::TrendTable`], logical combinators over it, and the
//! concrete gender, name and year filters the presentation layer combines
//! into a [`TrendQuery`].

pub mod trend;

use std::fmt::Debug;

use crate::models::AggregatedRecord;

pub use trend::{GenderFilter, NameSetFilter, TrendQuery, YearRangeFilter};

/// A predicate over aggregated rows
pub trait RowFilter: Debug {
    /// Whether the row passes the filter
    fn matches(&self, row: &AggregatedRecord) -> bool;

    /// Combine with another filter using logical AND
    fn and<F>(self, other: F) -> AndFilter
    where
        Self: Sized + Send + Sync + 'static,
        F: RowFilter + Send + Sync + 'static,
    {
        let filters: Vec<Box<dyn RowFilter + Send + Sync>> = vec![Box::new(self), Box::new(other)];
        AndFilter::new(filters)
    }

    /// Negate this filter
    fn negate(self) -> NotFilter<Self>
    where
        Self: Sized,
    {
        NotFilter::new(self)
    }
}

impl<F: RowFilter + ?Sized> RowFilter for Box<F> {
    fn matches(&self, row: &AggregatedRecord) -> bool {
        (**self).matches(row)
    }
}

/// A filter that accepts every row
#[derive(Debug, Clone, Default)]
pub struct IncludeAllFilter;

impl RowFilter for IncludeAllFilter {
    fn matches(&self, _row: &AggregatedRecord) -> bool {
        true
    }
}

/// A filter that combines multiple filters with a logical AND
#[derive(Debug, Default)]
pub struct AndFilter {
    filters: Vec<Box<dyn RowFilter + Send + Sync>>,
}

impl AndFilter {
    /// Create a new AND filter; with no filters it accepts every row
    #[must_use]
    pub fn new(filters: Vec<Box<dyn RowFilter + Send + Sync>>) -> Self {
        Self { filters }
    }

    /// Add another filter to the conjunction
    #[must_use]
    pub fn with<F>(mut self, filter: F) -> Self
    where
        F: RowFilter + Send + Sync + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }
}

impl RowFilter for AndFilter {
    fn matches(&self, row: &AggregatedRecord) -> bool {
        self.filters.iter().all(|filter| filter.matches(row))
    }
}

/// A filter that negates another filter
#[derive(Debug, Clone)]
pub struct NotFilter<F> {
    filter: F,
}

impl<F: RowFilter> NotFilter<F> {
    /// Create a new NOT filter
    #[must_use]
    pub fn new(filter: F) -> Self {
        Self { filter }
    }
}

impl<F: RowFilter> RowFilter for NotFilter<F> {
    fn matches(&self, row: &AggregatedRecord) -> bool {
        !self.filter.matches(row)
    }
}
