// src/config/model.rs

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::task::Task;

/// Raw project file as read from TOML, before validation.
///
/// ```toml
/// [config]
/// limit = 5
/// scopes = ["cli", "web"]
///
/// [[task]]
/// id = "001"
/// title = "Set up repo"
/// status = "completed"
/// dependencies = []
/// touches = ["cli"]
/// ```
///
/// All sections are optional at the serde level; validation requires at
/// least one task.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Planning defaults from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Tasks from `[[task]]`, in file order.
    #[serde(default)]
    pub task: Vec<Task>,
}

/// Validated project file.
///
/// Produced by `TryFrom<RawConfigFile>`, which checks for unique, non-empty
/// task IDs.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub task: Vec<Task>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, task: Vec<Task>) -> Self {
        Self { config, task }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.task
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSection {
    /// Default number of recommendations for `next`.
    ///
    /// If `None`, [`DEFAULT_LIMIT`] applies.
    #[serde(default)]
    pub limit: Option<usize>,

    /// Recognized scope names. Unknown scopes on tasks produce warnings
    /// during track assignment; `None` disables the check.
    #[serde(default)]
    pub scopes: Option<BTreeSet<String>>,
}

/// Recommendation count used when neither the CLI nor the file sets one.
pub const DEFAULT_LIMIT: usize = 5;

impl ConfigSection {
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}
