// src/dag/graph.rs

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::task::{Task, TaskId};

/// Internal node structure: stores immediate deps and dependents.
///
/// Only IDs present in the graph appear here; references to unknown tasks
/// stay on the [`Task`] but never become edges.
#[derive(Debug, Clone, Default)]
struct DagNode {
    /// Direct dependencies: tasks that must complete before this one.
    deps: Vec<TaskId>,
    /// Direct dependents: tasks that list this one as a dependency.
    dependents: Vec<TaskId>,
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Upstream,
    Downstream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnStack,
    Done,
}

/// In-memory dependency graph keyed by task ID.
///
/// Edges run from a dependency to its dependent. The graph owns a snapshot of
/// the tasks it was built from and never changes after construction.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    /// Task IDs in input order (first occurrence of each ID).
    order: Vec<TaskId>,
    tasks: HashMap<TaskId, Task>,
    nodes: HashMap<TaskId, DagNode>,
}

impl TaskGraph {
    /// Build the graph from a task list.
    ///
    /// When an ID occurs more than once the last record wins, matching a plain
    /// ID -> task map; its position in [`TaskGraph::task_ids`] is the first
    /// occurrence.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut order: Vec<TaskId> = Vec::with_capacity(tasks.len());
        let mut map: HashMap<TaskId, Task> = HashMap::with_capacity(tasks.len());

        for task in tasks {
            if map.insert(task.id.clone(), task.clone()).is_some() {
                warn!(task = %task.id, "duplicate task id; later record replaces earlier one");
            } else {
                order.push(task.id.clone());
            }
        }

        let mut nodes: HashMap<TaskId, DagNode> = order
            .iter()
            .map(|id| (id.clone(), DagNode::default()))
            .collect();

        // Second pass: record edges for dependencies that resolve.
        for id in order.iter() {
            let deps = map
                .get(id)
                .map(|t| t.dependencies.clone())
                .unwrap_or_default();

            for dep in deps {
                if !map.contains_key(&dep) {
                    continue;
                }
                let already = nodes
                    .get(id)
                    .map(|n| n.deps.contains(&dep))
                    .unwrap_or(false);
                if already {
                    continue;
                }
                if let Some(node) = nodes.get_mut(id) {
                    node.deps.push(dep.clone());
                }
                if let Some(dep_node) = nodes.get_mut(&dep) {
                    dep_node.dependents.push(id.clone());
                }
            }
        }

        let edges: usize = nodes.values().map(|n| n.deps.len()).sum();
        debug!(tasks = order.len(), edges, "built task graph");

        Self {
            order,
            tasks: map,
            nodes,
        }
    }

    /// Number of distinct tasks.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// All task IDs, in input order.
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// All tasks, in input order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|id| self.tasks.get(id))
    }

    /// Immediate dependencies of a task that resolve to loaded tasks.
    pub fn dependencies_of(&self, id: &str) -> &[TaskId] {
        self.nodes
            .get(id)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a task (tasks that list this one).
    pub fn dependents_of(&self, id: &str) -> &[TaskId] {
        self.nodes
            .get(id)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Tasks without any resolvable dependency, in input order.
    pub fn roots(&self) -> Vec<TaskId> {
        self.order
            .iter()
            .filter(|id| self.dependencies_of(id).is_empty())
            .cloned()
            .collect()
    }

    /// Every task `id` transitively depends on, excluding `id` itself.
    pub fn upstream(&self, id: &str) -> HashSet<TaskId> {
        self.reachable(id, Direction::Upstream)
    }

    /// Every task that transitively depends on `id`, excluding `id` itself.
    pub fn downstream(&self, id: &str) -> HashSet<TaskId> {
        self.reachable(id, Direction::Downstream)
    }

    /// Size of [`TaskGraph::downstream`] for every task.
    pub fn downstream_counts(&self) -> HashMap<TaskId, usize> {
        self.order
            .iter()
            .map(|id| (id.clone(), self.downstream(id).len()))
            .collect()
    }

    /// Subgraph restricted to `keep`.
    ///
    /// Each kept task's `dependencies` is pruned to IDs in `keep`, so edges to
    /// excluded tasks disappear.
    pub fn filter_tasks(&self, keep: &HashSet<TaskId>) -> TaskGraph {
        let kept: Vec<Task> = self
            .tasks()
            .filter(|t| keep.contains(&t.id))
            .map(|t| {
                let mut task = t.clone();
                task.dependencies.retain(|dep| keep.contains(dep));
                task
            })
            .collect();

        TaskGraph::from_tasks(&kept)
    }

    /// Find dependency cycles.
    ///
    /// Depth-first search along dependency edges, visiting roots in input
    /// order. A back edge to a task still on the search path yields the path
    /// slice from that task to the top as one cycle. Identical cycles are
    /// reported once. Returns an empty list for acyclic input.
    pub fn detect_cycles(&self) -> Vec<Vec<TaskId>> {
        let mut cycles: Vec<Vec<TaskId>> = Vec::new();
        let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(self.order.len());

        for root in self.order.iter() {
            if marks.contains_key(root.as_str()) {
                continue;
            }

            // `path` is the search stack; `cursor` the next edge per frame.
            let mut path: Vec<&str> = vec![root.as_str()];
            let mut cursor: Vec<usize> = vec![0];
            marks.insert(root.as_str(), Mark::OnStack);

            while let Some(&id) = path.last() {
                let deps = self.dependencies_of(id);
                let top = cursor.len() - 1;
                let next = cursor[top];

                if next >= deps.len() {
                    marks.insert(id, Mark::Done);
                    path.pop();
                    cursor.pop();
                    continue;
                }

                cursor[top] += 1;
                let dep = deps[next].as_str();

                match marks.get(dep) {
                    None => {
                        marks.insert(dep, Mark::OnStack);
                        path.push(dep);
                        cursor.push(0);
                    }
                    Some(Mark::OnStack) => {
                        if let Some(start) = path.iter().position(|p| *p == dep) {
                            let cycle: Vec<TaskId> =
                                path[start..].iter().map(|s| s.to_string()).collect();
                            if !cycles.contains(&cycle) {
                                warn!(cycle = ?cycle, "dependency cycle detected");
                                cycles.push(cycle);
                            }
                        }
                    }
                    Some(Mark::Done) => {}
                }
            }
        }

        debug!(cycles = cycles.len(), "cycle detection finished");
        cycles
    }

    fn edges(&self, id: &str, direction: Direction) -> &[TaskId] {
        match direction {
            Direction::Upstream => self.dependencies_of(id),
            Direction::Downstream => self.dependents_of(id),
        }
    }

    fn reachable(&self, start: &str, direction: Direction) -> HashSet<TaskId> {
        let mut visited: HashSet<TaskId> = HashSet::new();
        let mut stack: Vec<&str> = self
            .edges(start, direction)
            .iter()
            .map(|s| s.as_str())
            .collect();

        while let Some(id) = stack.pop() {
            if id == start || visited.contains(id) {
                continue;
            }
            visited.insert(id.to_string());
            stack.extend(self.edges(id, direction).iter().map(|s| s.as_str()));
        }

        visited
    }
}
