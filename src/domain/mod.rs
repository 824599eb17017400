//! Domain models for the project tracker
//!
//! Contains the core business logic without any I/O concerns.

mod critical_path;
mod date;
mod graph;
mod id;
mod project;
mod records;
mod task;
mod validation;

pub use critical_path::{critical_path, path_days, CriticalPath};
pub use date::{days_between, format_date, parse_date, DATE_FORMAT};
pub use graph::{DependencyGraph, GraphError};
pub use id::{ChangeId, MemberId, MilestoneId, RiskId, TaskId};
pub use project::Project;
pub use records::{ChangeEntry, Member, Milestone, Risk};
pub use task::Task;
pub use validation::{validate_date_range, validate_risk, ValidationError};
