// src/config/validate.rs

use std::collections::HashSet;

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TaskmdError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::TaskmdError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.task))
    }
}

/// Run every project-file check.
///
/// Unknown dependency IDs and dependency cycles are accepted here;
/// the planning engine reports them as data.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_raw_config(cfg)
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_global_config(cfg)?;
    validate_task_fields(cfg)?;
    validate_unique_ids(cfg)?;
    debug!(tasks = cfg.task.len(), "project file validated");
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(TaskmdError::ConfigError(
            "project file must contain at least one [[task]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.limit == Some(0) {
        return Err(TaskmdError::ConfigError(
            "[config].limit must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_fields(cfg: &RawConfigFile) -> Result<()> {
    for (pos, task) in cfg.task.iter().enumerate() {
        if task.id.trim().is_empty() {
            return Err(TaskmdError::ConfigError(format!(
                "task #{} has an empty `id`",
                pos + 1
            )));
        }
        if task.title.trim().is_empty() {
            return Err(TaskmdError::ConfigError(format!(
                "task '{}' has an empty `title`",
                task.id
            )));
        }
    }
    Ok(())
}

fn validate_unique_ids(cfg: &RawConfigFile) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(cfg.task.len());
    for task in cfg.task.iter() {
        if !seen.insert(task.id.as_str()) {
            return Err(TaskmdError::ConfigError(format!(
                "duplicate task id '{}'",
                task.id
            )));
        }
    }
    Ok(())
}
