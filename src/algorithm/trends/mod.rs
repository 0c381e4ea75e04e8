//! First-name trend aggregation
//!
//! Raw rows are normalized, grouped per (name, year, gender), joined with the
//! per-(year, gender) birth totals and turned into percentages. The
//! statistics module summarizes a selection of the result per name.

pub mod aggregate;
pub mod normalize;
pub mod statistics;

pub use aggregate::aggregate;
pub use normalize::normalize;
pub use statistics::{NameSummary, TrendStatistics, YearShare};
