// src/dag/analysis.rs

//! Depth, ordering and critical-path analysis over task dependencies.
//!
//! All traversals use explicit stacks with an on-stack guard, so cyclic or
//! very deep inputs terminate without recursion.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::dag::graph::TaskGraph;
use crate::task::{Task, TaskId};

/// Read-only analyzer over a task slice.
///
/// Dependency IDs that are not loaded count as unmet and contribute no depth.
#[derive(Debug, Clone)]
pub struct DependencyAnalyzer<'a> {
    tasks: &'a [Task],
    task_map: HashMap<&'a str, &'a Task>,
}

/// One frame of the iterative depth computation.
struct DepthFrame<'a> {
    task: &'a Task,
    next: usize,
    best: usize,
}

impl<'a> DependencyAnalyzer<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        let task_map = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
        Self { tasks, task_map }
    }

    pub fn get(&self, id: &str) -> Option<&'a Task> {
        self.task_map.get(id).copied()
    }

    /// True if any dependency is missing or not completed.
    pub fn has_unmet_dependencies(&self, task: &Task) -> bool {
        task.dependencies.iter().any(|dep| match self.task_map.get(dep.as_str()) {
            Some(d) => !d.is_completed(),
            None => true,
        })
    }

    /// A task is blocked when it has an unmet dependency and is itself not
    /// completed. A completed task with unmet dependencies is not blocked.
    pub fn is_blocked(&self, task: &Task) -> bool {
        self.has_unmet_dependencies(task) && !task.is_completed()
    }

    /// IDs of blocked tasks, in input order.
    pub fn blocked_tasks(&self) -> Vec<TaskId> {
        self.tasks
            .iter()
            .filter(|t| self.is_blocked(t))
            .map(|t| t.id.clone())
            .collect()
    }

    /// Dependency depth of every loaded task.
    ///
    /// A task with no loaded dependency has depth 1; otherwise it is one more
    /// than its deepest loaded dependency. A dependency that is already being
    /// computed further up the stack contributes 0, which breaks cycles.
    pub fn depth_map(&self) -> BTreeMap<TaskId, usize> {
        let mut memo: HashMap<&'a str, usize> = HashMap::with_capacity(self.tasks.len());

        for task in self.tasks {
            if let Some(&root) = self.task_map.get(task.id.as_str()) {
                self.fill_depth(root, &mut memo);
            }
        }

        memo.into_iter().map(|(id, d)| (id.to_string(), d)).collect()
    }

    /// Depth of a single task, or `None` if it is not loaded.
    ///
    /// Always agrees with [`DependencyAnalyzer::depth_map`]: on cyclic input
    /// the cycle is cut where the input-order scan cuts it.
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.get(id)?;
        self.depth_map().get(id).copied()
    }

    fn fill_depth(&self, root: &'a Task, memo: &mut HashMap<&'a str, usize>) {
        if memo.contains_key(root.id.as_str()) {
            return;
        }

        let mut on_stack: HashSet<&'a str> = HashSet::new();
        on_stack.insert(root.id.as_str());
        let mut stack = vec![DepthFrame {
            task: root,
            next: 0,
            best: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let task: &'a Task = frame.task;

            let Some(dep) = task.dependencies.get(frame.next) else {
                let value = frame.best + 1;
                stack.pop();
                on_stack.remove(task.id.as_str());
                memo.insert(task.id.as_str(), value);
                if let Some(parent) = stack.last_mut() {
                    parent.best = parent.best.max(value);
                }
                continue;
            };
            frame.next += 1;

            let depth = if let Some(&d) = memo.get(dep.as_str()) {
                d
            } else if on_stack.contains(dep.as_str()) {
                0
            } else if let Some(&dep_task) = self.task_map.get(dep.as_str()) {
                on_stack.insert(dep_task.id.as_str());
                stack.push(DepthFrame {
                    task: dep_task,
                    next: 0,
                    best: 0,
                });
                continue;
            } else {
                0
            };

            frame.best = frame.best.max(depth);
        }
    }

    /// Topological position of every loaded task.
    ///
    /// Tasks are visited in input order; each task's dependencies are numbered
    /// first (in listed order), then the task gets the next counter value,
    /// starting at 0. Lower numbers are further upstream.
    pub fn topological_order(&self) -> BTreeMap<TaskId, usize> {
        let mut order: BTreeMap<TaskId, usize> = BTreeMap::new();
        let mut visited: HashSet<&'a str> = HashSet::with_capacity(self.tasks.len());
        let mut counter = 0usize;

        for task in self.tasks {
            if visited.contains(task.id.as_str()) {
                continue;
            }
            let Some(&root) = self.task_map.get(task.id.as_str()) else {
                continue;
            };

            visited.insert(root.id.as_str());
            let mut stack: Vec<(&'a Task, usize)> = vec![(root, 0)];

            while let Some((current, next)) = stack.last_mut() {
                let current: &'a Task = *current;
                match current.dependencies.get(*next) {
                    Some(dep) => {
                        *next += 1;
                        if visited.contains(dep.as_str()) {
                            continue;
                        }
                        if let Some(&dep_task) = self.task_map.get(dep.as_str()) {
                            visited.insert(dep_task.id.as_str());
                            stack.push((dep_task, 0));
                        }
                    }
                    None => {
                        stack.pop();
                        order.insert(current.id.clone(), counter);
                        counter += 1;
                    }
                }
            }
        }

        order
    }

    /// Tasks on any maximum-depth dependency chain.
    pub fn critical_path_tasks(&self) -> BTreeSet<TaskId> {
        let depths = self.depth_map();
        self.critical_path_from(&depths)
    }

    /// Critical path from a precomputed [`DependencyAnalyzer::depth_map`].
    ///
    /// Every task at the maximum depth is included, then each included task
    /// pulls in the dependencies sitting exactly one level below it.
    pub fn critical_path_from(&self, depths: &BTreeMap<TaskId, usize>) -> BTreeSet<TaskId> {
        let mut critical: BTreeSet<TaskId> = BTreeSet::new();
        let Some(&max_depth) = depths.values().max() else {
            return critical;
        };

        let mut stack: Vec<&str> = depths
            .iter()
            .filter(|(_, d)| **d == max_depth)
            .map(|(id, _)| id.as_str())
            .collect();

        while let Some(id) = stack.pop() {
            if !critical.insert(id.to_string()) {
                continue;
            }
            let (Some(task), Some(&depth)) = (self.task_map.get(id), depths.get(id)) else {
                continue;
            };
            for dep in task.dependencies.iter() {
                if depth > 0 && depths.get(dep.as_str()) == Some(&(depth - 1)) {
                    stack.push(dep.as_str());
                }
            }
        }

        debug!(
            max_depth,
            critical = critical.len(),
            "critical path computed"
        );
        critical
    }
}

/// Full analysis snapshot of a task set.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub depth: BTreeMap<TaskId, usize>,
    pub topological_order: BTreeMap<TaskId, usize>,
    pub critical_path: BTreeSet<TaskId>,
    pub blocked: Vec<TaskId>,
    pub cycles: Vec<Vec<TaskId>>,
}

impl Analysis {
    pub fn compute(tasks: &[Task]) -> Self {
        let analyzer = DependencyAnalyzer::new(tasks);
        let depth = analyzer.depth_map();
        let critical_path = analyzer.critical_path_from(&depth);

        Self {
            topological_order: analyzer.topological_order(),
            blocked: analyzer.blocked_tasks(),
            cycles: TaskGraph::from_tasks(tasks).detect_cycles(),
            depth,
            critical_path,
        }
    }
}
