// src/dag/mod.rs

//! Dependency graph and analysis.
//!
//! - [`graph`] holds the task graph: adjacency, upstream/downstream walks,
//!   subgraph filtering and cycle detection.
//! - [`analysis`] computes depth, topological order, critical-path membership
//!   and blocked state directly from the task list.

pub mod analysis;
pub mod graph;

pub use analysis::{Analysis, DependencyAnalyzer};
pub use graph::TaskGraph;
