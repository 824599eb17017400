//! Task domain model
//!
//! Tasks are the scheduled units of work in a project. They can depend on
//! other tasks of the same project; dependencies are stored as [`TaskId`]
//! handles, never as owned tasks.

use chrono::NaiveDate;
use serde::Serialize;

use super::date::{days_between, serde_date};
use super::id::TaskId;

/// A task in the project schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    /// Handle of this task inside its project
    pub id: TaskId,

    /// Task name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// First day of work
    #[serde(with = "serde_date")]
    pub start: NaiveDate,

    /// Last day of work (never before `start`)
    #[serde(with = "serde_date")]
    pub end: NaiveDate,

    /// Person responsible for the task
    pub responsible: String,

    /// Status label, kept as opaque text
    pub status: String,

    /// Tasks this one depends on, in insertion order
    pub dependencies: Vec<TaskId>,
}

impl Task {
    /// Creates a task with no dependencies
    ///
    /// Callers are expected to have validated `start <= end`.
    pub fn new(
        id: TaskId,
        name: impl Into<String>,
        description: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        responsible: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            start,
            end,
            responsible: responsible.into(),
            status: status.into(),
            dependencies: Vec::new(),
        }
    }

    /// Duration in whole days (`end - start`)
    pub fn duration_days(&self) -> i64 {
        days_between(self.start, self.end)
    }

    /// Adds a dependency, ignoring duplicates
    ///
    /// Returns true if the dependency was added.
    pub fn add_dependency(&mut self, depends_on: TaskId) -> bool {
        if self.dependencies.contains(&depends_on) {
            return false;
        }
        self.dependencies.push(depends_on);
        true
    }

    /// Returns true if the task has no dependencies
    pub fn is_leaf(&self) -> bool {
        self.dependencies.is_empty()
    }
}
