//! Plan files
//!
//! A plan file describes a whole project in TOML so reports can be produced
//! without the interactive shell:
//!
//! ```toml
//! [project]
//! name = "Website relaunch"
//! start = "01/03/2024"
//! end = "30/06/2024"
//! budget = 25000
//!
//! [[members]]
//! name = "Awa"
//! role = "Developer"
//!
//! [[tasks]]
//! name = "Build"
//! start = "01/03/2024"
//! end = "15/04/2024"
//! depends_on = ["Design"]
//! ```
//!
//! Entries go through the same validation as interactive input. Members are
//! added first so they receive every later notification; dependencies are
//! resolved by task name once all tasks exist.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

use super::config::ProjectSettings;
use crate::domain::Project;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Plan {
    /// Overrides the configured project header
    pub project: Option<ProjectSettings>,
    pub members: Vec<PlanMember>,
    pub tasks: Vec<PlanTask>,
    pub risks: Vec<PlanRisk>,
    pub milestones: Vec<PlanMilestone>,
    pub changes: Vec<PlanChange>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanMember {
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanTask {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub responsible: String,
    #[serde(default)]
    pub status: String,
    /// Names of tasks this one depends on
    #[serde(default)]
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanRisk {
    pub description: String,
    #[serde(deserialize_with = "text_or_number")]
    pub probability: String,
    #[serde(deserialize_with = "text_or_number")]
    pub impact: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanMilestone {
    pub name: String,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanChange {
    pub description: String,
    pub version: String,
    pub date: String,
}

/// Accepts `0.3` as well as `"0.3"` so numbers reach the validator as text
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match toml::Value::deserialize(deserializer)? {
        toml::Value::String(s) => Ok(s),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a number or string, got {}",
            other.type_str()
        ))),
    }
}

impl Plan {
    /// Reads a plan file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse plan: {}", path.display()))
    }

    /// Parses plan text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Creates the project described by this plan
    ///
    /// `defaults` supplies the header when the plan has no `[project]` table.
    pub fn build(&self, defaults: &ProjectSettings) -> Result<Project> {
        self.project.as_ref().unwrap_or(defaults).build()
    }

    /// Applies every entry to `project`, stopping at the first invalid one
    pub fn apply(&self, project: &mut Project) -> Result<()> {
        for member in &self.members {
            project.add_member(&member.name, &member.role);
        }

        let mut ids = Vec::with_capacity(self.tasks.len());
        for task in &self.tasks {
            let id = project
                .add_task(
                    &task.name,
                    &task.description,
                    &task.start,
                    &task.end,
                    &task.responsible,
                    &task.status,
                )
                .with_context(|| format!("Invalid task '{}'", task.name))?;
            ids.push(id);
        }

        for (task, &id) in self.tasks.iter().zip(&ids) {
            for dep_name in &task.depends_on {
                let dep = project.find_task(dep_name).with_context(|| {
                    format!("Task '{}' depends on unknown task '{}'", task.name, dep_name)
                })?;
                project
                    .add_dependency(id, dep)
                    .with_context(|| format!("Invalid dependency of task '{}'", task.name))?;
            }
        }

        for risk in &self.risks {
            project
                .add_risk(&risk.description, &risk.probability, &risk.impact)
                .with_context(|| format!("Invalid risk '{}'", risk.description))?;
        }

        for milestone in &self.milestones {
            project
                .add_milestone(&milestone.name, &milestone.date)
                .with_context(|| format!("Invalid milestone '{}'", milestone.name))?;
        }

        for change in &self.changes {
            project
                .record_change(&change.description, &change.version, &change.date)
                .with_context(|| format!("Invalid change '{}'", change.description))?;
        }

        tracing::info!(
            tasks = project.tasks().len(),
            members = project.members().len(),
            "Plan applied"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"
[project]
name = "Relaunch"
description = "Website relaunch"
start = "01/03/2024"
end = "30/06/2024"
budget = 25000

[[members]]
name = "Awa"
role = "Developer"

[[tasks]]
name = "Ship"
start = "01/06/2024"
end = "03/06/2024"
depends_on = ["Build"]

[[tasks]]
name = "Build"
start = "01/04/2024"
end = "21/04/2024"
depends_on = ["Design"]

[[tasks]]
name = "Design"
start = "01/03/2024"
end = "11/03/2024"

[[risks]]
description = "Hosting outage"
probability = 0.2
impact = 6

[[risks]]
description = "Scope creep"
probability = "0.5"
impact = "3"

[[milestones]]
name = "Beta"
date = "15/05/2024"

[[changes]]
description = "Initial plan"
version = "1.0"
date = "01/03/2024"
"#;

    #[test]
    fn builds_full_project() {
        let plan = Plan::parse(PLAN).unwrap();
        let mut project = plan.build(&ProjectSettings::default()).unwrap();
        plan.apply(&mut project).unwrap();

        assert_eq!(project.name(), "Relaunch");
        assert_eq!(project.members().len(), 1);
        assert_eq!(project.tasks().len(), 3);
        assert_eq!(project.risks().len(), 2);
        assert_eq!(project.risks()[0].impact, 6);
        assert_eq!(project.milestones().len(), 1);
        assert_eq!(project.changes().len(), 1);

        let path = project.critical_path_detail();
        let names: Vec<_> = path
            .tasks
            .iter()
            .map(|id| project.task(*id).unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["Ship", "Build", "Design"]);
        assert_eq!(path.total_days, 2 + 20 + 10);
    }

    #[test]
    fn missing_project_table_uses_defaults() {
        let plan = Plan::parse("").unwrap();
        let project = plan.build(&ProjectSettings::default()).unwrap();
        assert_eq!(project.name(), "Linguere Service");
    }

    #[test]
    fn unknown_dependency_is_reported() {
        let plan = Plan::parse(
            r#"
[[tasks]]
name = "Build"
start = "01/04/2024"
end = "21/04/2024"
depends_on = ["Ghost"]
"#,
        )
        .unwrap();
        let mut project = plan.build(&ProjectSettings::default()).unwrap();

        let err = plan.apply(&mut project).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown task 'Ghost'"));
    }

    #[test]
    fn dependencies_follow_their_own_entry_when_names_repeat() {
        let plan = Plan::parse(
            r#"
[[tasks]]
name = "Deploy"
start = "01/04/2024"
end = "02/04/2024"

[[tasks]]
name = "Deploy"
start = "10/04/2024"
end = "12/04/2024"
depends_on = ["Prep"]

[[tasks]]
name = "Prep"
start = "01/04/2024"
end = "05/04/2024"
"#,
        )
        .unwrap();
        let mut project = plan.build(&ProjectSettings::default()).unwrap();
        plan.apply(&mut project).unwrap();

        let tasks = project.tasks();
        let prep = tasks[2].id;
        assert!(tasks[0].dependencies.is_empty());
        assert_eq!(tasks[1].dependencies, vec![prep]);
    }

    #[test]
    fn cyclic_plan_is_rejected() {
        let plan = Plan::parse(
            r#"
[[tasks]]
name = "A"
start = "01/04/2024"
end = "02/04/2024"
depends_on = ["B"]

[[tasks]]
name = "B"
start = "01/04/2024"
end = "02/04/2024"
depends_on = ["A"]
"#,
        )
        .unwrap();
        let mut project = plan.build(&ProjectSettings::default()).unwrap();

        let err = plan.apply(&mut project).unwrap_err();
        assert!(format!("{:#}", err).contains("cycle"));
    }

    #[test]
    fn invalid_risk_names_the_entry() {
        let plan = Plan::parse(
            r#"
[[risks]]
description = "Risque1"
probability = "élevée"
impact = "fort"
"#,
        )
        .unwrap();
        let mut project = plan.build(&ProjectSettings::default()).unwrap();

        let err = plan.apply(&mut project).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid risk 'Risque1'"));
        assert!(project.risks().is_empty());
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(Plan::parse("[[members]]\nname = \"Awa\"\nteam = \"x\"\n").is_err());
    }

    #[test]
    fn boolean_probability_rejected() {
        let text = "[[risks]]\ndescription = \"x\"\nprobability = true\nimpact = 1\n";
        assert!(Plan::parse(text).is_err());
    }
}
