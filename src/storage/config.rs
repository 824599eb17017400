//! Configuration handling for the project tracker
//!
//! Configuration is read from `--config <path>` (or `$PTRACK_CONFIG`) when
//! given, otherwise from `config.toml` in the platform config directory
//! (e.g. `~/.config/ptrack/config.toml`). A missing default file means
//! built-in defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{parse_date, Project};
use crate::notify::{Channel, ConsoleNotifier};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),
}

/// Header of the project created at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    pub name: String,
    pub description: String,

    /// Start date (`DD/MM/YYYY`)
    pub start: String,

    /// End date (`DD/MM/YYYY`)
    pub end: String,

    pub budget: f64,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            name: "Linguere Service".to_string(),
            description: "Agence de recrutement".to_string(),
            start: "01/11/2023".to_string(),
            end: "03/06/2024".to_string(),
            budget: 3_000_000.0,
        }
    }
}

impl ProjectSettings {
    /// Creates an empty project from these settings
    pub fn build(&self) -> Result<Project> {
        Project::new(
            &self.name,
            &self.description,
            &self.start,
            &self.end,
            self.budget,
        )
        .with_context(|| format!("Invalid project settings for '{}'", self.name))
    }
}

/// Notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Broadcast events to the team
    pub enabled: bool,

    /// Simulated transport
    pub channel: Channel,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            channel: Channel::Email,
        }
    }
}

impl NotificationConfig {
    /// Builds the configured console port, if enabled
    pub fn console_port(&self) -> Option<ConsoleNotifier> {
        self.enabled.then(|| ConsoleNotifier::new(self.channel))
    }
}

/// Interactive shell settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Print the full report after every successful change
    pub echo_report: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self { echo_report: true }
    }
}

/// Combined configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectSettings,
    pub notifications: NotificationConfig,
    pub shell: ShellConfig,

    /// File this configuration was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from an explicit path or the default location
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_config_path() {
                Some(path) => match Self::load_from(&path) {
                    Err(e) if is_not_found(&e) => Ok(Self::default()),
                    loaded => loaded,
                },
                None => Ok(Self::default()),
            },
        }
    }

    /// Returns the platform config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "ptrack", "ptrack").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read config: {}", path.display()))
            }
        };

        let mut config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        config.source = Some(path.to_path_buf());

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parses and validates configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("project.start", &self.project.start), ("project.end", &self.project.end)] {
            parse_date(value).map_err(|e| ConfigError::Invalid(format!("{}: {}", field, e)))?;
        }
        Ok(())
    }

    /// Serializes the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::NotFound(_)))
}
