// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod plan;
pub mod task;
pub mod types;

pub use dag::{Analysis, DependencyAnalyzer, TaskGraph};
pub use plan::{
    Filter, Recommendation, RecommendOptions, Track, TrackAssignment, TrackOptions,
    assign_tracks, recommend,
};
pub use task::{Task, TaskId};
pub use types::{Effort, Priority, Status};

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use crate::cli::{CliArgs, Command, GraphQuery};
use crate::config::ConfigFile;
use crate::config::loader::load_and_validate;
use crate::errors::{Result, TaskmdError};

/// High-level entry point used by `main.rs`.
///
/// Loads the project file, runs the requested command and prints its JSON
/// result on stdout.
pub fn run(args: CliArgs) -> anyhow::Result<()> {
    let cfg = load_and_validate(&args.file)?;
    info!(file = %args.file, tasks = cfg.task.len(), "loaded project file");

    let output = execute(&cfg, &args.command)?;
    println!("{output}");
    Ok(())
}

#[derive(Debug, Serialize)]
struct Reachable<'a> {
    id: &'a str,
    direction: &'static str,
    tasks: BTreeSet<TaskId>,
}

/// Run one command against a validated project file and render JSON.
pub fn execute(cfg: &ConfigFile, command: &Command) -> Result<String> {
    let tasks = cfg.tasks();

    let json = match command {
        Command::Next {
            limit,
            filters,
            quick_wins,
            critical,
        } => {
            let opts = RecommendOptions {
                limit: Some(limit.unwrap_or_else(|| cfg.config.effective_limit())),
                filters: plan::filter::parse_all(filters)?,
                quick_wins: *quick_wins,
                critical_only: *critical,
            };
            let recs = recommend(tasks, &opts);
            info!(recommendations = recs.len(), "next");
            serde_json::to_string_pretty(&recs)?
        }
        Command::Tracks { limit, filters } => {
            let opts = TrackOptions {
                filters: plan::filter::parse_all(filters)?,
                known_scopes: cfg.config.scopes.clone(),
                limit: *limit,
            };
            let assignment = assign_tracks(tasks, &opts);
            info!(
                tracks = assignment.tracks.len(),
                flexible = assignment.flexible.len(),
                "tracks"
            );
            serde_json::to_string_pretty(&assignment)?
        }
        Command::Graph { query } => {
            let graph = TaskGraph::from_tasks(tasks);
            match query {
                GraphQuery::Cycles => serde_json::to_string_pretty(&graph.detect_cycles())?,
                GraphQuery::Upstream { id } => {
                    ensure_known(&graph, id)?;
                    serde_json::to_string_pretty(&Reachable {
                        id,
                        direction: "upstream",
                        tasks: graph.upstream(id).into_iter().collect(),
                    })?
                }
                GraphQuery::Downstream { id } => {
                    ensure_known(&graph, id)?;
                    serde_json::to_string_pretty(&Reachable {
                        id,
                        direction: "downstream",
                        tasks: graph.downstream(id).into_iter().collect(),
                    })?
                }
            }
        }
        Command::Analyze => serde_json::to_string_pretty(&Analysis::compute(tasks))?,
    };

    Ok(json)
}

fn ensure_known(graph: &TaskGraph, id: &str) -> Result<()> {
    if graph.contains(id) {
        Ok(())
    } else {
        Err(TaskmdError::TaskNotFound(id.to_string()))
    }
}
