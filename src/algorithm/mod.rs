//! Algorithms over the name dataset

pub mod trends;

pub use trends::{NameSummary, TrendStatistics, aggregate, normalize};
