//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `shell` | Interactive menu for building a project (default) |
//! | `report --plan <file>` | Full report of a plan file |
//! | `critical-path --plan <file>` | Critical path of a plan file |
//! | `config` | Effective configuration |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logs on stderr:
//! ```bash
//! ptrack --verbose report --plan plan.toml
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod shell;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use shell::{MenuChoice, Shell};
