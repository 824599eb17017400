//! Team members, risks, milestones and change-log entries
//!
//! Plain records with no behavior beyond construction. Validation happens in
//! the project before any of these are built.

use chrono::NaiveDate;
use serde::Serialize;

use super::date::serde_date;

/// A team member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    pub role: String,
}

impl Member {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

/// A project risk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Risk {
    pub description: String,

    /// Likelihood in [0, 1]
    pub probability: f64,

    /// Severity in [1, 10]
    pub impact: u8,
}

impl Risk {
    pub fn new(description: impl Into<String>, probability: f64, impact: u8) -> Self {
        Self {
            description: description.into(),
            probability,
            impact,
        }
    }
}

/// A dated milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub name: String,
    #[serde(with = "serde_date")]
    pub date: NaiveDate,
}

impl Milestone {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }
}

/// A change-log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEntry {
    pub description: String,

    /// Version label (free text)
    pub version: String,

    #[serde(with = "serde_date")]
    pub date: NaiveDate,
}

impl ChangeEntry {
    pub fn new(description: impl Into<String>, version: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            version: version.into(),
            date,
        }
    }
}
