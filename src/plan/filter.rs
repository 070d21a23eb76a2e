// src/plan/filter.rs

//! `field=value` predicates used to narrow candidate tasks.
//!
//! Filters are parsed once up front; matching is infallible.

use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, TaskmdError};
use crate::task::Task;

/// Field a [`Filter`] inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Status,
    Priority,
    Effort,
    Id,
    /// Case-insensitive substring of the title.
    Title,
    /// Membership in the task's tags.
    Tag,
    /// `true`/`false` for presence, otherwise the exact parent ID.
    Parent,
    /// `true` when the task declares any dependency.
    Blocked,
}

impl FromStr for FilterField {
    type Err = TaskmdError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "status" => Ok(FilterField::Status),
            "priority" => Ok(FilterField::Priority),
            "effort" => Ok(FilterField::Effort),
            "id" => Ok(FilterField::Id),
            "title" => Ok(FilterField::Title),
            "tag" => Ok(FilterField::Tag),
            "parent" => Ok(FilterField::Parent),
            "blocked" => Ok(FilterField::Blocked),
            other => Err(TaskmdError::InvalidFilter(format!(
                "unknown filter field '{other}' (expected status, priority, effort, id, title, tag, parent or blocked)"
            ))),
        }
    }
}

/// A single parsed filter condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: FilterField,
    pub value: String,
}

impl Filter {
    /// Parse a `field=value` expression. Only the first `=` separates.
    pub fn parse(expr: &str) -> Result<Self> {
        let Some((field, value)) = expr.split_once('=') else {
            return Err(TaskmdError::InvalidFilter(format!(
                "invalid filter format (expected field=value): {expr}"
            )));
        };

        let field = field.trim();
        if field.is_empty() {
            return Err(TaskmdError::InvalidFilter(format!(
                "missing field name in filter: {expr}"
            )));
        }

        Ok(Self {
            field: field.parse()?,
            value: value.trim().to_string(),
        })
    }

    pub fn matches(&self, task: &Task) -> bool {
        let value = self.value.as_str();
        match self.field {
            FilterField::Status => task.status.as_str() == value,
            FilterField::Priority => task.priority.as_str() == value,
            FilterField::Effort => task.effort.as_str() == value,
            FilterField::Id => task.id == value,
            FilterField::Title => task
                .title
                .to_lowercase()
                .contains(&value.to_lowercase()),
            FilterField::Tag => task.tags.iter().any(|t| t == value),
            FilterField::Parent => {
                let parent = task.parent.as_deref().unwrap_or("");
                match value {
                    "true" => !parent.is_empty(),
                    "false" => parent.is_empty(),
                    _ => parent == value,
                }
            }
            FilterField::Blocked => {
                let declares_deps = !task.dependencies.is_empty();
                (value == "true" && declares_deps) || (value == "false" && !declares_deps)
            }
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterField::Status => "status",
            FilterField::Priority => "priority",
            FilterField::Effort => "effort",
            FilterField::Id => "id",
            FilterField::Title => "title",
            FilterField::Tag => "tag",
            FilterField::Parent => "parent",
            FilterField::Blocked => "blocked",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

/// Parse a list of filter expressions, failing on the first bad one.
pub fn parse_all<S: AsRef<str>>(exprs: &[S]) -> Result<Vec<Filter>> {
    exprs.iter().map(|e| Filter::parse(e.as_ref())).collect()
}

/// Tasks matching every filter (AND), in input order.
pub fn apply<'a>(tasks: &'a [Task], filters: &[Filter]) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| filters.iter().all(|f| f.matches(task)))
        .collect()
}
