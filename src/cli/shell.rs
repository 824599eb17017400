//! Interactive menu shell
//!
//! Reads numbered choices and field values line by line, applies them to the
//! project and prints the report after each successful change. End of input
//! ends the session like the quit entry does.

use std::io::{BufRead, Write};

use anyhow::Result;

use super::output::OutputFormat;
use crate::domain::{Project, ValidationError};
use crate::report::{self, ReportData};

const MENU: &str = "\
MENU:
1. Add a task
2. Add a team member
3. Add a risk
4. Add a milestone
5. Record a change
6. Add a task dependency
7. Generate a report
8. Quit";

/// A menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddTask,
    AddMember,
    AddRisk,
    AddMilestone,
    RecordChange,
    AddDependency,
    Report,
    Quit,
}

impl MenuChoice {
    /// Parses the number typed at the menu prompt
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddTask),
            "2" => Some(Self::AddMember),
            "3" => Some(Self::AddRisk),
            "4" => Some(Self::AddMilestone),
            "5" => Some(Self::RecordChange),
            "6" => Some(Self::AddDependency),
            "7" => Some(Self::Report),
            "8" => Some(Self::Quit),
            _ => None,
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Interactive session over any line reader and writer
pub struct Shell<R, W> {
    input: R,
    out: W,
    format: OutputFormat,
    echo_report: bool,
}

/// Reads the next field or ends the session on end of input
macro_rules! field {
    ($shell:expr, $label:expr) => {
        match $shell.ask($label)? {
            Some(value) => value,
            None => return Ok(Flow::Quit),
        }
    };
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, out: W, format: OutputFormat, echo_report: bool) -> Self {
        Self {
            input,
            out,
            format,
            echo_report,
        }
    }

    /// Runs the menu loop until quit or end of input
    pub fn run(&mut self, project: &mut Project) -> Result<()> {
        tracing::debug!(project = project.name(), "Shell session started");

        loop {
            writeln!(self.out)?;
            writeln!(self.out, "{}", MENU)?;
            let Some(choice) = self.ask("Enter your choice: ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&choice) {
                Some(choice) => self.handle(choice, project)?,
                None => {
                    writeln!(self.out, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Quit = flow {
                break;
            }
        }

        writeln!(self.out, "Program finished.")?;
        self.out.flush()?;
        Ok(())
    }

    fn handle(&mut self, choice: MenuChoice, project: &mut Project) -> Result<Flow> {
        match choice {
            MenuChoice::AddTask => {
                let name = field!(self, "Task name: ");
                let description = field!(self, "Task description: ");
                let start = field!(self, "Task start date (DD/MM/YYYY): ");
                let end = field!(self, "Task end date (DD/MM/YYYY): ");
                let responsible = field!(self, "Task owner: ");
                let status = field!(self, "Task status: ");

                let result =
                    project.add_task(&name, &description, &start, &end, &responsible, &status);
                self.after_change(project, result.map(|_| format!("Task '{}' added.", name)))?;
            }
            MenuChoice::AddMember => {
                let name = field!(self, "Member name: ");
                let role = field!(self, "Member role: ");

                project.add_member(&name, &role);
                self.after_change(project, Ok(format!("Member '{}' added.", name)))?;
            }
            MenuChoice::AddRisk => {
                let description = field!(self, "Risk description: ");
                let probability = field!(self, "Risk probability (0-1): ");
                let impact = field!(self, "Risk impact (1-10): ");

                let result = project.add_risk(&description, &probability, &impact);
                self.after_change(project, result.map(|_| format!("Risk '{}' added.", description)))?;
            }
            MenuChoice::AddMilestone => {
                let name = field!(self, "Milestone name: ");
                let date = field!(self, "Milestone date (DD/MM/YYYY): ");

                let result = project.add_milestone(&name, &date);
                self.after_change(project, result.map(|_| format!("Milestone '{}' added.", name)))?;
            }
            MenuChoice::RecordChange => {
                let description = field!(self, "Change description: ");
                let version = field!(self, "Change version: ");
                let date = field!(self, "Change date (DD/MM/YYYY): ");

                let result = project.record_change(&description, &version, &date);
                self.after_change(
                    project,
                    result.map(|_| format!("Change '{}' recorded.", description)),
                )?;
            }
            MenuChoice::AddDependency => {
                let task_name = field!(self, "Task name: ");
                let dep_name = field!(self, "Depends on (task name): ");
                self.add_dependency(project, &task_name, &dep_name)?;
            }
            MenuChoice::Report => self.print_report(project)?,
            MenuChoice::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn add_dependency(&mut self, project: &mut Project, task_name: &str, dep_name: &str) -> Result<()> {
        let (Some(task), Some(dep)) = (project.find_task(task_name), project.find_task(dep_name))
        else {
            let missing = if project.find_task(task_name).is_none() {
                task_name
            } else {
                dep_name
            };
            writeln!(self.out, "Error: Task not found: '{}'", missing)?;
            return Ok(());
        };

        match project.add_dependency(task, dep) {
            Ok(()) => {
                writeln!(self.out, "'{}' now depends on '{}'.", task_name, dep_name)?;
                if self.echo_report {
                    self.print_report(project)?;
                }
            }
            Err(e) => writeln!(self.out, "Error: {}", e)?,
        }
        Ok(())
    }

    fn after_change(&mut self, project: &Project, result: Result<String, ValidationError>) -> Result<()> {
        match result {
            Ok(message) => {
                writeln!(self.out, "{}", message)?;
                if self.echo_report {
                    self.print_report(project)?;
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Input rejected");
                writeln!(self.out, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    fn print_report(&mut self, project: &Project) -> Result<()> {
        match self.format {
            OutputFormat::Text => write!(self.out, "{}", report::generate(project))?,
            OutputFormat::Json => {
                let json = serde_json::to_string(&ReportData::from_project(project))?;
                writeln!(self.out, "{}", json)?;
            }
        }
        Ok(())
    }

    /// Prompts for one line; `None` at end of input
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']);
        Ok(Some(trimmed.to_string()))
    }
}
