//! Dependency graph for tasks
//!
//! Tracks dependency edges between tasks with cycle detection. Uses petgraph
//! for graph operations.

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;
use thiserror::Error;

use super::id::TaskId;
use super::task::Task;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphError {
    #[error("Adding dependency would create a cycle: {0} -> {1}")]
    CycleDetected(TaskId, TaskId),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Self-dependency not allowed: {0}")]
    SelfDependency(TaskId),
}

/// A dependency graph for tasks
///
/// Edge direction is `depends_on -> task`: a dependency points at the tasks
/// waiting on it. Nodes keep the insertion order of the tasks they were
/// built from.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// The underlying directed graph
    graph: DiGraph<TaskId, ()>,

    /// Map from TaskId to node index
    node_map: HashMap<TaskId, NodeIndex>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds a graph from a task arena
    ///
    /// Edges are copied as stored; handles that point outside the arena are
    /// skipped. Use [`is_acyclic`](Self::is_acyclic) to check the result.
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut graph = Self::new();

        let tasks: Vec<_> = tasks.into_iter().collect();
        for task in &tasks {
            graph.add_task(task.id);
        }

        for task in &tasks {
            let Some(&task_idx) = graph.node_map.get(&task.id) else {
                continue;
            };
            for dep_id in &task.dependencies {
                if let Some(&dep_idx) = graph.node_map.get(dep_id) {
                    graph.graph.update_edge(dep_idx, task_idx, ());
                }
            }
        }

        graph
    }

    /// Adds a task to the graph
    pub fn add_task(&mut self, task_id: TaskId) {
        if !self.node_map.contains_key(&task_id) {
            let idx = self.graph.add_node(task_id);
            self.node_map.insert(task_id, idx);
        }
    }

    /// Adds a dependency edge: `task` depends on `depends_on`
    ///
    /// The graph is left unchanged when the edge is rejected.
    pub fn add_dependency(&mut self, task: TaskId, depends_on: TaskId) -> Result<(), GraphError> {
        if task == depends_on {
            return Err(GraphError::SelfDependency(task));
        }

        let task_idx = *self
            .node_map
            .get(&task)
            .ok_or(GraphError::TaskNotFound(task))?;

        let dep_idx = *self
            .node_map
            .get(&depends_on)
            .ok_or(GraphError::TaskNotFound(depends_on))?;

        if self.graph.find_edge(dep_idx, task_idx).is_some() {
            return Ok(());
        }

        let edge = self.graph.add_edge(dep_idx, task_idx, ());

        if is_cyclic_directed(&self.graph) {
            self.graph.remove_edge(edge);
            return Err(GraphError::CycleDetected(task, depends_on));
        }

        Ok(())
    }

    /// Returns tasks that no other task depends on, in insertion order
    pub fn roots(&self) -> Vec<TaskId> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .filter_map(|idx| self.graph.node_weight(idx).copied())
            .collect()
    }

    /// Returns true if the graph has no dependency cycle
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }
}
