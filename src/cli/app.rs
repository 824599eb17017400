//! Main CLI application structure

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use super::output::{Output, OutputFormat};
use super::shell::Shell;
use crate::domain::{format_date, Project};
use crate::notify::Channel;
use crate::report::{self, ReportData};
use crate::storage::{Config, Plan};

#[derive(Parser)]
#[command(name = "ptrack")]
#[command(author, version, about = "Track tasks, risks and milestones of a project")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file
    #[arg(long, global = true, env = "PTRACK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive menu (default)
    Shell {
        /// Notification channel, overriding the config
        #[arg(long)]
        channel: Option<Channel>,

        /// Do not notify the team
        #[arg(long)]
        no_notify: bool,

        /// Do not print the report after each change
        #[arg(long)]
        quiet: bool,
    },

    /// Print the report of a plan file
    Report {
        /// Plan file (TOML)
        #[arg(long)]
        plan: PathBuf,

        /// Print team notifications while the plan is applied
        #[arg(long)]
        notify: bool,
    },

    /// Print the critical path of a plan file
    CriticalPath {
        /// Plan file (TOML)
        #[arg(long)]
        plan: PathBuf,
    },

    /// Show the effective configuration
    Config,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = Output::new(cli.format);
    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(source = ?config.source, "Configuration ready");

    match cli.command.unwrap_or(Commands::Shell {
        channel: None,
        no_notify: false,
        quiet: false,
    }) {
        Commands::Shell {
            channel,
            no_notify,
            quiet,
        } => {
            let mut notifications = config.notifications.clone();
            if let Some(channel) = channel {
                notifications.channel = channel;
            }
            if no_notify {
                notifications.enabled = false;
            }

            let mut project = config.project.build()?;
            if let Some(port) = notifications.console_port() {
                project.set_notification_port(Some(Box::new(port)));
            }

            let echo = config.shell.echo_report && !quiet;
            let stdin = io::stdin();
            Shell::new(stdin.lock(), io::stdout(), output.format(), echo).run(&mut project)?;
        }

        Commands::Report { plan, notify } => {
            let project = load_plan(&config, &plan, notify)?;
            if output.is_json() {
                output.data(&ReportData::from_project(&project));
            } else {
                output.text(&report::generate(&project));
            }
        }

        Commands::CriticalPath { plan } => {
            let project = load_plan(&config, &plan, false)?;
            print_critical_path(&output, &project);
        }

        Commands::Config => {
            if output.is_json() {
                output.data(&config);
            } else {
                match &config.source {
                    Some(path) => println!("# Loaded from {}", path.display()),
                    None => println!("# Built-in defaults"),
                }
                print!("{}", config.to_toml()?);
            }
        }
    }

    tracing::debug!("Command completed successfully");
    Ok(())
}

/// Installs the log subscriber; `--verbose` shows debug events on stderr
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("project_tracker=debug")
    } else {
        EnvFilter::try_from_env("PTRACK_LOG").unwrap_or_else(|_| EnvFilter::new("project_tracker=warn"))
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Builds the project described by a plan file
fn load_plan(config: &Config, path: &Path, notify: bool) -> Result<Project> {
    let plan = Plan::load(path)?;
    let mut project = plan.build(&config.project)?;

    if notify {
        if let Some(port) = config.notifications.console_port() {
            project.set_notification_port(Some(Box::new(port)));
        }
    }

    plan.apply(&mut project)?;
    Ok(project)
}

fn print_critical_path(output: &Output, project: &Project) {
    let path = project.critical_path_detail();

    if output.is_json() {
        let tasks: Vec<_> = path
            .tasks
            .iter()
            .filter_map(|id| project.task(*id))
            .map(|t| {
                serde_json::json!({
                    "id": t.id.to_string(),
                    "name": t.name,
                    "start": format_date(t.start),
                    "end": format_date(t.end),
                    "days": t.duration_days(),
                })
            })
            .collect();
        output.data(&serde_json::json!({
            "total_days": path.total_days,
            "tasks": tasks,
        }));
        return;
    }

    if path.is_empty() {
        println!("No tasks in project.");
        return;
    }

    println!(
        "Critical path: {} task(s), {} day(s)",
        path.len(),
        path.total_days
    );
    println!("{:<6} {:<30} {:<12} {:<12} DAYS", "ID", "NAME", "START", "END");
    println!("{}", "-".repeat(70));
    for task in path.tasks.iter().filter_map(|id| project.task(*id)) {
        println!(
            "{:<6} {:<30} {:<12} {:<12} {}",
            task.id.to_string(),
            task.name,
            format_date(task.start),
            format_date(task.end),
            task.duration_days()
        );
    }
}
