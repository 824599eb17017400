//! Project aggregate
//!
//! Owns every entity collection and is the only way to create entities.
//! Each mutator validates its input, appends the entity and then broadcasts
//! an event to the team through the configured notification port. A rejected
//! input leaves the project untouched and sends nothing.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::critical_path::{critical_path, CriticalPath};
use super::date::parse_date;
use super::graph::{DependencyGraph, GraphError};
use super::id::{ChangeId, MemberId, MilestoneId, RiskId, TaskId};
use super::records::{ChangeEntry, Member, Milestone, Risk};
use super::task::Task;
use super::validation::{validate_date_range, validate_risk, ValidationError};
use crate::notify::NotificationPort;

/// A tracked project
pub struct Project {
    name: String,
    description: String,
    start: NaiveDate,
    end: NaiveDate,
    budget: f64,
    tasks: Vec<Task>,
    members: Vec<Member>,
    risks: Vec<Risk>,
    milestones: Vec<Milestone>,
    changes: Vec<ChangeEntry>,
    notifier: Option<Box<dyn NotificationPort>>,
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.name)
            .field("tasks", &self.tasks.len())
            .field("members", &self.members.len())
            .field("risks", &self.risks.len())
            .field("milestones", &self.milestones.len())
            .field("changes", &self.changes.len())
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

impl Project {
    /// Creates an empty project
    ///
    /// Dates use `DD/MM/YYYY`. The budget is stored as given.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start: &str,
        end: &str,
        budget: f64,
    ) -> Result<Self, ValidationError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;

        Ok(Self {
            name: name.into(),
            description: description.into(),
            start,
            end,
            budget,
            tasks: Vec::new(),
            members: Vec::new(),
            risks: Vec::new(),
            milestones: Vec::new(),
            changes: Vec::new(),
            notifier: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn risks(&self) -> &[Risk] {
        &self.risks
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn changes(&self) -> &[ChangeEntry] {
        &self.changes
    }

    /// Looks up a task by handle
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.index())
    }

    /// Returns the first task with the given name
    pub fn find_task(&self, name: &str) -> Option<TaskId> {
        self.tasks.iter().find(|t| t.name == name).map(|t| t.id)
    }

    /// Installs or clears the notification port
    pub fn set_notification_port(&mut self, port: Option<Box<dyn NotificationPort>>) {
        debug!(configured = port.is_some(), "Notification port updated");
        self.notifier = port;
    }

    /// Adds a task with no dependencies
    pub fn add_task(
        &mut self,
        name: &str,
        description: &str,
        start: &str,
        end: &str,
        responsible: &str,
        status: &str,
    ) -> Result<TaskId, ValidationError> {
        let (start, end) = validate_date_range(start, end)?;

        let id = TaskId::new(self.tasks.len());
        let task = Task::new(id, name, description, start, end, responsible, status);
        info!(task = %id, name, "Task added");
        self.tasks.push(task);

        self.notify(&format!("New task added: {}", name));
        Ok(id)
    }

    /// Adds a team member
    pub fn add_member(&mut self, name: &str, role: &str) -> MemberId {
        let id = MemberId::new(self.members.len());
        self.members.push(Member::new(name, role));
        info!(member = %id, name, role, "Member added");

        self.notify(&format!("{} was added to the team", name));
        id
    }

    /// Adds a risk from textual probability and impact
    pub fn add_risk(
        &mut self,
        description: &str,
        probability: &str,
        impact: &str,
    ) -> Result<RiskId, ValidationError> {
        let (probability, impact) = validate_risk(probability, impact)?;

        let id = RiskId::new(self.risks.len());
        self.risks.push(Risk::new(description, probability, impact));
        info!(risk = %id, probability, impact, "Risk added");

        self.notify(&format!("New risk added: {}", description));
        Ok(id)
    }

    /// Adds a milestone
    pub fn add_milestone(&mut self, name: &str, date: &str) -> Result<MilestoneId, ValidationError> {
        let date = parse_date(date)?;

        let id = MilestoneId::new(self.milestones.len());
        self.milestones.push(Milestone::new(name, date));
        info!(milestone = %id, name, "Milestone added");

        self.notify(&format!("New milestone added: {}", name));
        Ok(id)
    }

    /// Records a change-log entry
    pub fn record_change(
        &mut self,
        description: &str,
        version: &str,
        date: &str,
    ) -> Result<ChangeId, ValidationError> {
        let date = parse_date(date)?;

        let id = ChangeId::new(self.changes.len());
        self.changes.push(ChangeEntry::new(description, version, date));
        info!(change = %id, version, "Change recorded");

        self.notify(&format!("Change recorded: {} (version {})", description, version));
        Ok(id)
    }

    /// Makes `task` depend on `depends_on`
    ///
    /// Rejects unknown handles, self-dependencies and edges that would close
    /// a cycle. Adding an existing edge again is a no-op and sends nothing.
    pub fn add_dependency(&mut self, task: TaskId, depends_on: TaskId) -> Result<(), GraphError> {
        let mut graph = DependencyGraph::from_tasks(&self.tasks);
        graph.add_dependency(task, depends_on)?;

        let added = self
            .tasks
            .get_mut(task.index())
            .ok_or(GraphError::TaskNotFound(task))?
            .add_dependency(depends_on);

        if added {
            let task_name = self.tasks[task.index()].name.clone();
            let dep_name = self.tasks[depends_on.index()].name.clone();
            info!(task = %task, depends_on = %depends_on, "Dependency added");
            self.notify(&format!(
                "Dependency added: {} now depends on {}",
                task_name, dep_name
            ));
        }

        Ok(())
    }

    /// Handles of the critical path, root first
    pub fn critical_path(&self) -> Vec<TaskId> {
        self.critical_path_detail().tasks
    }

    /// Critical path with its total duration
    pub fn critical_path_detail(&self) -> CriticalPath {
        critical_path(&self.tasks)
    }

    /// Renders the full text report
    pub fn generate_report(&self) -> String {
        crate::report::generate(self)
    }

    /// Sends `message` to every member through the configured port
    fn notify(&self, message: &str) {
        let Some(port) = self.notifier.as_deref() else {
            return;
        };

        debug!(recipients = self.members.len(), event = message, "Broadcasting notification");
        for member in &self.members {
            port.send(&member.name, message);
        }
    }
}
