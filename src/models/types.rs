//! Shared value types for the name dataset

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Gender of the births counted in a record.
///
/// Variants are declared in label order so that sorting by gender matches
/// sorting by `"Female" < "Male"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Gender {
    /// Female births
    Female,
    /// Male births
    Male,
}

impl Gender {
    /// Both genders, in sort order
    pub const ALL: [Self; 2] = [Self::Female, Self::Male];

    /// Display label used in exported tables
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Ok(Self::Male),
            "f" | "female" => Ok(Self::Female),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.label().to_string()
    }
}

impl TryFrom<String> for Gender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
