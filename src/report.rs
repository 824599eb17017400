//! Project report rendering
//!
//! Turns project state into a human-readable text block, or a serializable
//! snapshot for JSON output. The critical path is recomputed on every call.

use serde::Serialize;
use std::fmt::Write;

use crate::domain::{
    format_date, ChangeEntry, CriticalPath, Member, Milestone, Project, Risk, Task,
};

/// Renders the full text report
///
/// Sections: header, dates, budget, team, tasks, milestones, risks, changes,
/// then the critical path. Each stored entity appears once in its section.
pub fn generate(project: &Project) -> String {
    let mut out = String::new();
    let _ = render_into(&mut out, project);
    out
}

fn render_into(out: &mut String, project: &Project) -> std::fmt::Result {
    writeln!(out, "Project activity report '{}':", project.name())?;
    writeln!(out, "Description: {}", project.description())?;
    writeln!(
        out,
        "Dates: {} to {}",
        format_date(project.start()),
        format_date(project.end())
    )?;
    writeln!(out, "Budget: {}", project.budget())?;

    writeln!(out, "Team:")?;
    for member in project.members() {
        writeln!(out, "- {} ({})", member.name, member.role)?;
    }

    writeln!(out, "Tasks:")?;
    for task in project.tasks() {
        write!(
            out,
            "- [{}] {} ({} to {}), Responsible: {}, Status: {}",
            task.id,
            task.name,
            format_date(task.start),
            format_date(task.end),
            task.responsible,
            task.status
        )?;
        if !task.dependencies.is_empty() {
            let deps: Vec<String> = task.dependencies.iter().map(|d| d.to_string()).collect();
            write!(out, ", Depends on: {}", deps.join(", "))?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Milestones:")?;
    for milestone in project.milestones() {
        writeln!(out, "- {} ({})", milestone.name, format_date(milestone.date))?;
    }

    writeln!(out, "Risks:")?;
    for risk in project.risks() {
        writeln!(
            out,
            "- {} (Probability: {}, Impact: {})",
            risk.description, risk.probability, risk.impact
        )?;
    }

    writeln!(out, "Changes:")?;
    for change in project.changes() {
        writeln!(
            out,
            "- {} (version {}, {})",
            change.description,
            change.version,
            format_date(change.date)
        )?;
    }

    let path = project.critical_path_detail();
    writeln!(out, "Critical path ({} days):", path.total_days)?;
    for task in path.tasks.iter().filter_map(|id| project.task(*id)) {
        writeln!(
            out,
            "- {} ({} to {})",
            task.name,
            format_date(task.start),
            format_date(task.end)
        )?;
    }

    Ok(())
}

/// Serializable snapshot of a project report
#[derive(Debug, Serialize)]
pub struct ReportData<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub start: String,
    pub end: String,
    pub budget: f64,
    pub members: &'a [Member],
    pub tasks: &'a [Task],
    pub milestones: &'a [Milestone],
    pub risks: &'a [Risk],
    pub changes: &'a [ChangeEntry],
    pub critical_path: CriticalPathData,
}

/// Critical path with task names resolved
#[derive(Debug, Serialize)]
pub struct CriticalPathData {
    pub total_days: i64,
    pub tasks: Vec<String>,
}

impl CriticalPathData {
    pub fn new(project: &Project, path: &CriticalPath) -> Self {
        Self {
            total_days: path.total_days,
            tasks: path
                .tasks
                .iter()
                .filter_map(|id| project.task(*id))
                .map(|t| t.name.clone())
                .collect(),
        }
    }
}

impl<'a> ReportData<'a> {
    pub fn from_project(project: &'a Project) -> Self {
        let path = project.critical_path_detail();
        Self {
            name: project.name(),
            description: project.description(),
            start: format_date(project.start()),
            end: format_date(project.end()),
            budget: project.budget(),
            members: project.members(),
            tasks: project.tasks(),
            milestones: project.milestones(),
            risks: project.risks(),
            changes: project.changes(),
            critical_path: CriticalPathData::new(project, &path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project::new(
            "Linguere Service",
            "Agence de recrutement",
            "01/11/2023",
            "03/06/2024",
            3_000_000.0,
        )
        .unwrap()
    }

    /// Lines between a section header and the next header
    fn section<'r>(report: &'r str, header: &str) -> Vec<&'r str> {
        report
            .lines()
            .skip_while(|l| !l.starts_with(header))
            .skip(1)
            .take_while(|l| l.starts_with("- "))
            .collect()
    }

    #[test]
    fn empty_project_has_all_sections() {
        let report = generate(&project());

        assert!(report.starts_with("Project activity report 'Linguere Service':\n"));
        assert!(report.contains("Description: Agence de recrutement\n"));
        assert!(report.contains("Dates: 01/11/2023 to 03/06/2024\n"));
        assert!(report.contains("Budget: 3000000\n"));
        for header in ["Team:", "Tasks:", "Milestones:", "Risks:", "Changes:"] {
            assert!(report.contains(header), "missing {}", header);
            assert!(section(&report, header).is_empty());
        }
        assert!(report.ends_with("Critical path (0 days):\n"));
    }

    #[test]
    fn linguere_scenario() {
        let mut p = project();
        p.add_task(
            "Tache1",
            "Description de la tâche 1",
            "1/11/2023",
            "3/6/2024",
            "Responsable1",
            "en cours",
        )
        .unwrap();
        p.add_member("Membre1", "Role1");
        assert!(p.add_risk("Risque1", "élevée", "fort").is_err());
        p.add_milestone("Jalon1", "15/11/2023").unwrap();
        p.record_change("Changement1", "1.0", "01/12/2023").unwrap();

        assert_eq!(p.tasks().len(), 1);
        assert_eq!(p.members().len(), 1);
        assert_eq!(p.risks().len(), 0);
        assert_eq!(p.milestones().len(), 1);
        assert_eq!(p.changes().len(), 1);

        let report = p.generate_report();
        for needle in ["Tache1", "Membre1", "Jalon1", "Changement1"] {
            assert!(report.contains(needle), "report missing {}", needle);
        }
        assert!(!report.contains("Risque1"));
        assert!(report.contains(
            "- [t-1] Tache1 (01/11/2023 to 03/06/2024), Responsible: Responsable1, Status: en cours\n"
        ));
        assert!(report.contains("Critical path (215 days):\n- Tache1 (01/11/2023 to 03/06/2024)\n"));
    }

    #[test]
    fn every_entity_listed_once_in_its_section() {
        let mut p = project();
        p.add_member("Awa", "Dev");
        p.add_member("Awa", "Dev");
        let b = p.add_task("Beta", "", "01/01/2024", "03/01/2024", "Awa", "todo").unwrap();
        let a = p.add_task("Alpha", "", "01/01/2024", "02/01/2024", "Awa", "todo").unwrap();
        p.add_dependency(a, b).unwrap();
        p.add_risk("Churn", "0.25", "4").unwrap();
        p.add_milestone("Go-live", "01/02/2024").unwrap();
        p.record_change("Scope cut", "2.0-rc1", "05/01/2024").unwrap();

        let report = generate(&p);

        assert_eq!(section(&report, "Team:"), vec!["- Awa (Dev)", "- Awa (Dev)"]);
        let tasks = section(&report, "Tasks:");
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].starts_with("- [t-1] Beta"));
        assert!(tasks[1].ends_with("Depends on: t-1"));
        assert_eq!(section(&report, "Milestones:"), vec!["- Go-live (01/02/2024)"]);
        assert_eq!(
            section(&report, "Risks:"),
            vec!["- Churn (Probability: 0.25, Impact: 4)"]
        );
        assert_eq!(
            section(&report, "Changes:"),
            vec!["- Scope cut (version 2.0-rc1, 05/01/2024)"]
        );
        assert_eq!(
            section(&report, "Critical path"),
            vec!["- Alpha (01/01/2024 to 02/01/2024)", "- Beta (01/01/2024 to 03/01/2024)"]
        );
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut p = project();
        p.add_task("Tache1", "", "01/11/2023", "11/11/2023", "R", "todo").unwrap();

        let json = serde_json::to_value(ReportData::from_project(&p)).unwrap();
        assert_eq!(json["name"], "Linguere Service");
        assert_eq!(json["start"], "01/11/2023");
        assert_eq!(json["tasks"][0]["name"], "Tache1");
        assert_eq!(json["critical_path"]["total_days"], 10);
        assert_eq!(json["critical_path"]["tasks"][0], "Tache1");
    }
}
