//! # Storage Layer
//!
//! Reading of on-disk inputs. Projects themselves live in memory only; the
//! files here describe how to start one.
//!
//! ## File Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | `--config`, `$PTRACK_CONFIG`, or the platform config dir |
//! | Plan | TOML | `--plan <file>` |
//!
//! ## Key Types
//!
//! - [`Config`] - Project header, notification and shell settings
//! - [`Plan`] - A complete project described in one file

mod config;
mod plan;

pub use config::{Config, ConfigError, NotificationConfig, ProjectSettings, ShellConfig};
pub use plan::{Plan, PlanChange, PlanMember, PlanMilestone, PlanRisk, PlanTask};
