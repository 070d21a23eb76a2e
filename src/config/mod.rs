// src/config/mod.rs

//! Project file loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a project file from disk (`loader.rs`).
//! - Validate basic invariants like unique task IDs (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{DEFAULT_PROJECT_FILE, load_and_validate, load_from_path};
pub use model::{ConfigFile, ConfigSection, DEFAULT_LIMIT, RawConfigFile};
pub use validate::validate_config;
