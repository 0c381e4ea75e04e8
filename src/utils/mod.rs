//! Shared helpers

pub mod format;
pub mod logging;

pub use format::{format_percentage, format_thousands};
