// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_PROJECT_FILE;

/// Command-line arguments for `taskmd`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskmd",
    version,
    about = "Rank, analyze and partition dependent tasks.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the project file (TOML).
    ///
    /// Default: `taskmd.toml` in the current working directory.
    #[arg(
        long,
        short = 'f',
        value_name = "PATH",
        default_value = DEFAULT_PROJECT_FILE,
        global = true
    )]
    pub file: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKMD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Recommend what to work on next.
    Next {
        /// Maximum number of recommendations (default: `[config].limit` or 5).
        #[arg(long, value_name = "N")]
        limit: Option<usize>,

        /// Filter candidates, e.g. `--filter tag=cli` (repeatable, ANDed).
        #[arg(long = "filter", value_name = "FIELD=VALUE")]
        filters: Vec<String>,

        /// Only small-effort tasks.
        #[arg(long)]
        quick_wins: bool,

        /// Only tasks on the critical path.
        #[arg(long)]
        critical: bool,
    },

    /// Group actionable tasks into parallel tracks by shared scope.
    Tracks {
        /// Maximum number of tracks.
        #[arg(long, value_name = "N")]
        limit: Option<usize>,

        /// Filter candidates (repeatable, ANDed).
        #[arg(long = "filter", value_name = "FIELD=VALUE")]
        filters: Vec<String>,
    },

    /// Query the dependency graph.
    Graph {
        #[command(subcommand)]
        query: GraphQuery,
    },

    /// Depth, topological order, critical path, blocked tasks and cycles.
    Analyze,
}

#[derive(Debug, Clone, Subcommand)]
pub enum GraphQuery {
    /// List dependency cycles.
    Cycles,
    /// Everything a task transitively depends on.
    Upstream { id: String },
    /// Everything that transitively depends on a task.
    Downstream { id: String },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
