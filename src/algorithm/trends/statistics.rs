//! Per-name summary statistics
//!
//! This module computes the summary card shown next to a trend chart: the
//! peak year, the first and latest years present, and total births.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

use crate::filter::TrendQuery;
use crate::models::AggregatedRecord;
use crate::utils::{format_percentage, format_thousands};

/// A year and the name's share of births in it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearShare {
    pub year: i32,
    pub percentage: f64,
}

impl From<&AggregatedRecord> for YearShare {
    fn from(row: &AggregatedRecord) -> Self {
        Self {
            year: row.year,
            percentage: row.percentage,
        }
    }
}

impl fmt::Display for YearShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.year, format_percentage(self.percentage))
    }
}

/// Summary card for one name over a selection of rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameSummary {
    pub name: String,
    /// Year with the highest share; the earliest such year on ties
    pub peak: YearShare,
    /// Earliest year in the selection
    pub first: YearShare,
    /// Latest year in the selection
    pub latest: YearShare,
    /// Births with this name over the selection, saturating at `u64::MAX`
    pub total_births: u64,
}

impl fmt::Display for NameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  Peak Year: {}", self.peak)?;
        writeln!(f, "  First Year: {}", self.first)?;
        writeln!(f, "  Latest Year: {}", self.latest)?;
        writeln!(f, "  Total Births: {}", format_thousands(self.total_births))
    }
}

/// Functions for summarizing trend selections
pub struct TrendStatistics;

impl TrendStatistics {
    /// Summarize each requested name, in request order. Names without rows in
    /// the selection are left out. `rows` is expected to hold a single gender,
    /// as returned by [`crate::models::TrendTable::select`].
    #[must_use]
    pub fn summarize<R, S>(rows: &[R], names: &[S]) -> Vec<NameSummary>
    where
        R: Borrow<AggregatedRecord>,
        S: AsRef<str>,
    {
        names
            .iter()
            .filter_map(|name| Self::summarize_name(rows, name.as_ref()))
            .collect()
    }

    /// Summarize one name, or `None` when it has no rows in the selection
    #[must_use]
    pub fn summarize_name<R>(rows: &[R], name: &str) -> Option<NameSummary>
    where
        R: Borrow<AggregatedRecord>,
    {
        let name = name.trim().to_uppercase();
        let mut matching = rows
            .iter()
            .map(<R as Borrow<AggregatedRecord>>::borrow)
            .filter(|row| row.name == name);

        let head = matching.next()?;
        let mut peak = head;
        let mut first = head;
        let mut latest = head;
        let mut total_births = head.count;

        for row in matching {
            if row.percentage > peak.percentage
                || (row.percentage == peak.percentage && row.year < peak.year)
            {
                peak = row;
            }
            if row.year < first.year {
                first = row;
            }
            if row.year > latest.year {
                latest = row;
            }
            total_births = total_births.saturating_add(row.count);
        }

        Some(NameSummary {
            name,
            peak: peak.into(),
            first: first.into(),
            latest: latest.into(),
            total_births,
        })
    }

    /// Render the selection header and every summary card as text
    #[must_use]
    pub fn generate_report(query: &TrendQuery, summaries: &[NameSummary]) -> String {
        let mut report = String::new();
        report.push_str(&format!("Name Popularity Trends ({})\n", query.gender()));
        report.push_str(&format!(
            "Selected years: {} - {}\n",
            query.years().start(),
            query.years().end()
        ));

        if summaries.is_empty() {
            report.push_str("\nNo data for the selected names.\n");
        }
        for summary in summaries {
            report.push('\n');
            report.push_str(&summary.to_string());
        }

        report
    }
}
