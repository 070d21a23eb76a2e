// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! The planning engine itself never fails; these errors come from the outer
//! layers (project file loading, filter parsing, command dispatch).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskmdError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TaskmdError>;
