#![allow(dead_code)]

use std::collections::BTreeSet;

use taskmd::config::{ConfigFile, ConfigSection, RawConfigFile};
use taskmd::{Effort, Priority, Status, Task};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                task: Vec::new(),
            },
        }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.config.task.push(task);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.config.config.limit = Some(limit);
        self
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.config
            .config
            .scopes
            .get_or_insert_with(BTreeSet::new)
            .insert(scope.to_string());
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `Task`.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    /// Pending task titled "Task <id>".
    pub fn new(id: &str) -> Self {
        Self {
            task: Task::new(id, format!("Task {id}")),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.task.title = title.to_string();
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.task.status = status;
        self
    }

    pub fn completed(self) -> Self {
        self.status(Status::Completed)
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.task.priority = priority;
        self
    }

    pub fn effort(mut self, effort: Effort) -> Self {
        self.task.effort = effort;
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.dependencies.push(dep.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.task.tags.push(tag.to_string());
        self
    }

    pub fn touches(mut self, scope: &str) -> Self {
        self.task.touches.push(scope.to_string());
        self
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.task.parent = Some(parent.to_string());
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Shorthand for a chain of tasks where each depends on the previous one.
pub fn chain(ids: &[&str]) -> Vec<Task> {
    let mut tasks = Vec::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        let mut builder = TaskBuilder::new(id);
        if i > 0 {
            builder = builder.after(ids[i - 1]);
        }
        tasks.push(builder.build());
    }
    tasks
}
