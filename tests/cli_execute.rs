mod common;
use crate::common::{init_tracing, sample_project};

use std::error::Error;

use clap::Parser;
use serde_json::Value;

use taskmd::cli::{CliArgs, Command, GraphQuery};
use taskmd::config::ConfigFile;
use taskmd::errors::TaskmdError;
use taskmd::execute;
use taskmd_test_utils::builders::{ConfigFileBuilder, TaskBuilder};

type TestResult = Result<(), Box<dyn Error>>;

fn sample_config() -> ConfigFile {
    sample_project()
        .into_iter()
        .fold(ConfigFileBuilder::new(), |b, t| b.with_task(t))
        .build()
}

fn run(cfg: &ConfigFile, argv: &[&str]) -> Result<Value, Box<dyn Error>> {
    let args = CliArgs::try_parse_from(std::iter::once("taskmd").chain(argv.iter().copied()))?;
    let out = execute(cfg, &args.command)?;
    Ok(serde_json::from_str(&out)?)
}

fn ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn cli_parses_global_flags_after_the_subcommand() -> TestResult {
    let args = CliArgs::try_parse_from([
        "taskmd",
        "next",
        "--filter",
        "tag=cli",
        "--filter",
        "effort=small",
        "--quick-wins",
        "-f",
        "plan.toml",
        "--log-level",
        "debug",
    ])?;

    assert_eq!(args.file, "plan.toml");
    assert!(args.log_level.is_some());
    match args.command {
        Command::Next {
            limit,
            filters,
            quick_wins,
            critical,
        } => {
            assert_eq!(limit, None);
            assert_eq!(filters, vec!["tag=cli", "effort=small"]);
            assert!(quick_wins);
            assert!(!critical);
        }
        other => panic!("Expected next, got: {:?}", other),
    }

    Ok(())
}

#[test]
fn cli_defaults_the_project_file() -> TestResult {
    let args = CliArgs::try_parse_from(["taskmd", "graph", "upstream", "004"])?;

    assert_eq!(args.file, "taskmd.toml");
    assert!(matches!(
        args.command,
        Command::Graph {
            query: GraphQuery::Upstream { ref id }
        } if id == "004"
    ));

    Ok(())
}

#[test]
fn next_uses_the_configured_limit() -> TestResult {
    init_tracing();

    let cfg = sample_project()
        .into_iter()
        .fold(ConfigFileBuilder::new().with_limit(2), |b, t| b.with_task(t))
        .build();

    assert_eq!(ids(&run(&cfg, &["next"])?), vec!["003", "004"]);
    // The flag wins over the file.
    assert_eq!(ids(&run(&cfg, &["next", "--limit", "3"])?).len(), 3);

    Ok(())
}

#[test]
fn next_renders_ranked_json() -> TestResult {
    init_tracing();

    let value = run(&sample_config(), &["next"])?;

    assert_eq!(ids(&value), vec!["003", "004", "007", "005"]);
    assert_eq!(value[1]["on_critical_path"], Value::Bool(true));
    assert_eq!(value[2]["downstream_count"].as_u64(), Some(1));

    let critical = run(&sample_config(), &["next", "--critical"])?;
    assert_eq!(ids(&critical), vec!["004"]);

    Ok(())
}

#[test]
fn invalid_filter_surfaces_as_error() {
    init_tracing();

    let cfg = sample_config();
    let args = CliArgs::try_parse_from(["taskmd", "next", "--filter", "size=big"]).unwrap();

    assert!(matches!(
        execute(&cfg, &args.command),
        Err(TaskmdError::InvalidFilter(_))
    ));
}

#[test]
fn tracks_use_known_scopes_from_the_file() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .with_scope("cli")
        .with_task(TaskBuilder::new("A").touches("cli").build())
        .with_task(TaskBuilder::new("B").touches("cli").touches("gui").build())
        .with_task(TaskBuilder::new("C").build())
        .build();

    let value = run(&cfg, &["tracks"])?;

    let tracks = value["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0]["id"].as_u64(), Some(1));
    assert_eq!(tracks[0]["scopes"], serde_json::json!(["cli", "gui"]));
    assert_eq!(ids(&tracks[0]["tasks"]), vec!["A", "B"]);
    assert_eq!(ids(&value["flexible"]), vec!["C"]);
    assert_eq!(
        value["warnings"],
        serde_json::json!(["task B: unknown scope \"gui\""])
    );

    Ok(())
}

#[test]
fn graph_queries_render_sorted_ids() -> TestResult {
    init_tracing();

    let cfg = sample_config();

    let up = run(&cfg, &["graph", "upstream", "004"])?;
    assert_eq!(up["direction"], "upstream");
    assert_eq!(up["tasks"], serde_json::json!(["001", "002"]));

    let down = run(&cfg, &["graph", "downstream", "001"])?;
    assert_eq!(down["tasks"], serde_json::json!(["002", "003", "004"]));

    let cycles = run(&cfg, &["graph", "cycles"])?;
    assert_eq!(cycles, serde_json::json!([]));

    Ok(())
}

#[test]
fn graph_query_for_unknown_task_fails() {
    init_tracing();

    let cfg = sample_config();
    let args = CliArgs::try_parse_from(["taskmd", "graph", "downstream", "999"]).unwrap();

    match execute(&cfg, &args.command) {
        Err(TaskmdError::TaskNotFound(id)) => assert_eq!(id, "999"),
        other => panic!("Expected TaskNotFound, got: {:?}", other),
    }
}

#[test]
fn analyze_reports_every_view() -> TestResult {
    init_tracing();

    let value = run(&sample_config(), &["analyze"])?;

    assert_eq!(value["depth"]["004"].as_u64(), Some(3));
    assert_eq!(value["topological_order"]["001"].as_u64(), Some(0));
    assert_eq!(value["critical_path"], serde_json::json!(["001", "002", "004"]));
    assert_eq!(value["blocked"], serde_json::json!(["006"]));
    assert_eq!(value["cycles"], serde_json::json!([]));

    Ok(())
}
