// src/task.rs

//! The task record consumed by every engine component.

use serde::{Deserialize, Serialize};

use crate::types::{Effort, Priority, Status};

/// Canonical task identifier type used throughout the engine.
pub type TaskId = String;

/// A single unit of work as loaded from the project file.
///
/// The engine only ever reads tasks. `dependencies` may name IDs that are not
/// loaded and may repeat entries; both are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,

    pub title: String,

    #[serde(default)]
    pub status: Status,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub effort: Effort,

    /// IDs this task waits for, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Shared resources this task modifies ("scopes").
    #[serde(default)]
    pub touches: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TaskId>,
}

impl Task {
    /// Minimal pending task with no metadata.
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: Status::default(),
            priority: Priority::default(),
            effort: Effort::default(),
            dependencies: Vec::new(),
            tags: Vec::new(),
            touches: Vec::new(),
            parent: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}
