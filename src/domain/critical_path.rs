//! Critical path computation
//!
//! Walks every path from a root task (one nobody depends on) down through
//! its dependencies to a task with no dependencies, and keeps the path with
//! the largest total duration.
//!
//! Roots are visited in task insertion order and dependencies in the order
//! they were added, so ties always resolve to the first path found.

use serde::Serialize;
use tracing::{debug, warn};

use super::graph::DependencyGraph;
use super::id::TaskId;
use super::task::Task;

/// The longest root-to-leaf path through the dependency graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CriticalPath {
    /// Tasks from the root to the leaf
    pub tasks: Vec<TaskId>,

    /// Sum of task durations along the path, in days
    pub total_days: i64,
}

impl CriticalPath {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

/// Sum of task durations for a path of handles
///
/// Handles that do not resolve in `tasks` contribute nothing.
pub fn path_days(tasks: &[Task], path: &[TaskId]) -> i64 {
    path.iter()
        .filter_map(|id| tasks.get(id.index()))
        .map(Task::duration_days)
        .sum()
}

/// Computes the critical path of a task arena
///
/// `tasks[i].id` must be `TaskId::new(i)`; this holds for every arena built by
/// a [`Project`](super::Project). A dependency already on the current path is
/// skipped, so a cyclic arena still terminates.
pub fn critical_path(tasks: &[Task]) -> CriticalPath {
    let graph = DependencyGraph::from_tasks(tasks);
    if !graph.is_acyclic() {
        warn!("Dependency graph contains a cycle");
    }
    let mut best: Option<CriticalPath> = None;
    let mut paths_seen = 0usize;

    for root in graph.roots() {
        // Each frame is a task on the current path and the next dependency to visit.
        let mut stack: Vec<(TaskId, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let Some(task) = tasks.get(frame.0.index()) else {
                stack.pop();
                continue;
            };

            if task.is_leaf() {
                let path: Vec<TaskId> = stack.iter().map(|(id, _)| *id).collect();
                let total_days = path_days(tasks, &path);
                paths_seen += 1;

                if best.as_ref().map_or(true, |b| total_days > b.total_days) {
                    best = Some(CriticalPath {
                        tasks: path,
                        total_days,
                    });
                }

                stack.pop();
                continue;
            }

            let Some(&next) = task.dependencies.get(frame.1) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if stack.iter().any(|(id, _)| *id == next) {
                warn!(task = %task.id, dependency = %next, "Dependency cycle skipped");
                continue;
            }

            stack.push((next, 0));
        }
    }

    let result = best.unwrap_or_default();
    debug!(
        paths = paths_seen,
        length = result.len(),
        total_days = result.total_days,
        "Computed critical path"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    /// Builds an arena from (name, duration in days, dependency indices)
    fn arena(specs: &[(&str, i64, &[usize])]) -> Vec<Task> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        specs
            .iter()
            .enumerate()
            .map(|(i, (name, days, deps))| {
                let mut task = Task::new(
                    TaskId::new(i),
                    *name,
                    "",
                    start,
                    start + Duration::days(*days),
                    "",
                    "",
                );
                for &dep in deps.iter() {
                    task.add_dependency(TaskId::new(dep));
                }
                task
            })
            .collect()
    }

    fn names(tasks: &[Task], path: &CriticalPath) -> Vec<String> {
        path.tasks
            .iter()
            .map(|id| tasks[id.index()].name.clone())
            .collect()
    }

    #[test]
    fn empty_arena_has_empty_path() {
        let path = critical_path(&[]);
        assert!(path.is_empty());
        assert_eq!(path.total_days, 0);
    }

    #[test]
    fn single_task_is_its_own_path() {
        let tasks = arena(&[("Solo", 3, &[])]);
        let path = critical_path(&tasks);
        assert_eq!(names(&tasks, &path), vec!["Solo"]);
        assert_eq!(path.total_days, 3);
    }

    #[test]
    fn zero_length_task_still_forms_a_path() {
        let tasks = arena(&[("Kickoff", 0, &[])]);
        let path = critical_path(&tasks);
        assert_eq!(path.len(), 1);
        assert_eq!(path.total_days, 0);
    }

    #[test]
    fn longer_independent_root_wins() {
        let tasks = arena(&[("Short", 5, &[]), ("Long", 10, &[])]);
        let path = critical_path(&tasks);
        assert_eq!(names(&tasks, &path), vec!["Long"]);
        assert_eq!(path.total_days, 10);
    }

    #[test]
    fn chain_is_walked_root_first() {
        // A depends on B, B depends on C
        let tasks = arena(&[("A", 2, &[1]), ("B", 3, &[2]), ("C", 4, &[])]);
        let path = critical_path(&tasks);
        assert_eq!(names(&tasks, &path), vec!["A", "B", "C"]);
        assert_eq!(path.total_days, 9);
    }

    #[test]
    fn chain_declared_leaf_first() {
        let tasks = arena(&[("C", 4, &[]), ("B", 3, &[0]), ("A", 2, &[1])]);
        let path = critical_path(&tasks);
        assert_eq!(names(&tasks, &path), vec!["A", "B", "C"]);
    }

    #[test]
    fn branches_pick_heaviest_dependency() {
        // Root depends on Light and Heavy
        let tasks = arena(&[
            ("Root", 1, &[1, 2]),
            ("Light", 2, &[]),
            ("Heavy", 7, &[]),
        ]);
        let path = critical_path(&tasks);
        assert_eq!(names(&tasks, &path), vec!["Root", "Heavy"]);
        assert_eq!(path.total_days, 8);
    }

    #[test]
    fn ties_resolve_to_first_found() {
        let tasks = arena(&[
            ("Root", 1, &[1, 2]),
            ("Left", 4, &[]),
            ("Right", 4, &[]),
            ("Other", 5, &[]),
        ]);
        let path = critical_path(&tasks);
        assert_eq!(names(&tasks, &path), vec!["Root", "Left"]);

        let tasks = arena(&[("First", 6, &[]), ("Second", 6, &[])]);
        let path = critical_path(&tasks);
        assert_eq!(names(&tasks, &path), vec!["First"]);
    }

    #[test]
    fn convergent_dependency_is_shared_between_paths() {
        // Two roots share the same foundation task
        let tasks = arena(&[
            ("Foundation", 10, &[]),
            ("Walls", 3, &[0]),
            ("Garden", 5, &[0]),
        ]);
        let path = critical_path(&tasks);
        assert_eq!(names(&tasks, &path), vec!["Garden", "Foundation"]);
        assert_eq!(path.total_days, 15);
    }

    #[test]
    fn diamond_enumerates_both_routes() {
        // Top -> (Left | Right) -> Bottom
        let tasks = arena(&[
            ("Top", 1, &[1, 2]),
            ("Left", 1, &[3]),
            ("Right", 6, &[3]),
            ("Bottom", 2, &[]),
        ]);
        let path = critical_path(&tasks);
        assert_eq!(names(&tasks, &path), vec!["Top", "Right", "Bottom"]);
        assert_eq!(path.total_days, 9);
    }

    #[test]
    fn cycle_below_a_root_terminates() {
        // Root -> A <-> B, plus Root -> Leaf
        let tasks = arena(&[
            ("Root", 1, &[1, 3]),
            ("A", 5, &[2]),
            ("B", 5, &[1]),
            ("Leaf", 1, &[]),
        ]);
        let path = critical_path(&tasks);
        assert_eq!(names(&tasks, &path), vec!["Root", "Leaf"]);
    }

    #[test]
    fn pure_cycle_has_no_root() {
        let tasks = arena(&[("A", 1, &[1]), ("B", 1, &[0])]);
        assert!(critical_path(&tasks).is_empty());
    }

    #[test]
    fn path_days_sums_durations() {
        let tasks = arena(&[("A", 2, &[1]), ("B", 3, &[])]);
        assert_eq!(path_days(&tasks, &[TaskId::new(0), TaskId::new(1)]), 5);
        assert_eq!(path_days(&tasks, &[TaskId::new(9)]), 0);
    }
}
