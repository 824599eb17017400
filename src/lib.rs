//! Project tracker - tasks, team, risks and the critical path of one project
//!
//! A [`Project`] owns every entity and validates input before anything is
//! stored. Task dependencies form a graph whose longest root-to-leaf path
//! is the critical path. Team members are notified of changes through a
//! pluggable [`NotificationPort`].

pub mod cli;
pub mod domain;
pub mod notify;
pub mod report;
pub mod storage;

pub use domain::{CriticalPath, GraphError, Project, Task, TaskId, ValidationError};
pub use notify::NotificationPort;
