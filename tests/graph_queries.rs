mod common;
use crate::common::{init_tracing, sorted};

use std::collections::HashSet;

use taskmd::{DependencyAnalyzer, TaskGraph};
use taskmd_test_utils::builders::{TaskBuilder, chain};

#[test]
fn upstream_and_downstream_follow_edges_transitively() {
    init_tracing();

    // A <- B <- C, and D depends on A.
    let mut tasks = chain(&["A", "B", "C"]);
    tasks.push(TaskBuilder::new("D").after("A").build());

    let graph = TaskGraph::from_tasks(&tasks);

    assert_eq!(sorted(&graph.upstream("C")), vec!["A", "B"]);
    assert!(graph.upstream("A").is_empty());
    assert_eq!(sorted(&graph.downstream("A")), vec!["B", "C", "D"]);
    assert_eq!(sorted(&graph.downstream("B")), vec!["C"]);
    assert!(graph.downstream("C").is_empty());
}

#[test]
fn unknown_dependency_produces_no_edge() {
    init_tracing();

    let tasks = vec![
        TaskBuilder::new("A").after("ghost").build(),
        TaskBuilder::new("B").after("A").build(),
    ];
    let graph = TaskGraph::from_tasks(&tasks);

    assert!(graph.dependencies_of("A").is_empty());
    assert!(graph.upstream("A").is_empty());
    assert!(!graph.contains("ghost"));
    assert!(graph.downstream("ghost").is_empty());
    // The reference itself is still on the task.
    assert_eq!(graph.get("A").unwrap().dependencies, vec!["ghost"]);
    assert_eq!(graph.roots(), vec!["A"]);
}

#[test]
fn duplicate_dependency_entries_collapse_to_one_edge() {
    init_tracing();

    let tasks = vec![
        TaskBuilder::new("A").build(),
        TaskBuilder::new("B").after("A").after("A").build(),
    ];
    let graph = TaskGraph::from_tasks(&tasks);

    assert_eq!(graph.dependencies_of("B"), ["A".to_string()]);
    assert_eq!(graph.dependents_of("A"), ["B".to_string()]);
}

#[test]
fn filter_tasks_drops_edges_to_excluded_tasks() {
    init_tracing();

    let tasks = chain(&["A", "B", "C"]);
    let graph = TaskGraph::from_tasks(&tasks);

    let keep: HashSet<String> = ["B", "C"].iter().map(|s| s.to_string()).collect();
    let sub = graph.filter_tasks(&keep);

    assert_eq!(sub.len(), 2);
    assert!(!sub.contains("A"));
    assert!(sub.get("B").unwrap().dependencies.is_empty());
    assert_eq!(sub.get("C").unwrap().dependencies, vec!["B"]);
    assert_eq!(sorted(&sub.upstream("C")), vec!["B"]);
    assert_eq!(sub.task_ids().collect::<Vec<_>>(), vec!["B", "C"]);

    // The original graph is untouched.
    assert_eq!(sorted(&graph.upstream("C")), vec!["A", "B"]);
}

#[test]
fn acyclic_graph_has_no_cycles() {
    init_tracing();

    let mut tasks = chain(&["A", "B", "C"]);
    tasks.push(TaskBuilder::new("D").after("A").after("C").build());

    assert!(TaskGraph::from_tasks(&tasks).detect_cycles().is_empty());
}

#[test]
fn two_task_cycle_is_reported_once() {
    init_tracing();

    let tasks = vec![
        TaskBuilder::new("A").after("B").build(),
        TaskBuilder::new("B").after("A").build(),
    ];
    let cycles = TaskGraph::from_tasks(&tasks).detect_cycles();

    assert_eq!(cycles, vec![vec!["A".to_string(), "B".to_string()]]);
}

#[test]
fn cycle_is_the_stack_slice_from_the_revisited_task() {
    init_tracing();

    // Root R leads into the loop A -> C -> B -> A.
    let tasks = vec![
        TaskBuilder::new("R").after("A").build(),
        TaskBuilder::new("A").after("C").build(),
        TaskBuilder::new("B").after("A").build(),
        TaskBuilder::new("C").after("B").build(),
    ];
    let cycles = TaskGraph::from_tasks(&tasks).detect_cycles();

    assert_eq!(cycles, vec![vec!["A", "C", "B"]]);
}

#[test]
fn self_dependency_is_a_cycle_and_not_its_own_ancestor() {
    init_tracing();

    let tasks = vec![TaskBuilder::new("A").after("A").build()];
    let graph = TaskGraph::from_tasks(&tasks);

    assert_eq!(graph.detect_cycles(), vec![vec!["A".to_string()]]);
    assert!(graph.upstream("A").is_empty());
    assert!(graph.downstream("A").is_empty());
}

#[test]
fn cycles_sharing_a_task_are_both_reported() {
    init_tracing();

    let tasks = vec![
        TaskBuilder::new("A").after("B").after("C").build(),
        TaskBuilder::new("B").after("A").build(),
        TaskBuilder::new("C").after("A").build(),
    ];
    let cycles = TaskGraph::from_tasks(&tasks).detect_cycles();

    assert_eq!(cycles, vec![vec!["A", "B"], vec!["A", "C"]]);
}

#[test]
fn traversals_terminate_on_cycles() {
    init_tracing();

    let tasks = vec![
        TaskBuilder::new("A").after("C").build(),
        TaskBuilder::new("B").after("A").build(),
        TaskBuilder::new("C").after("B").build(),
    ];
    let graph = TaskGraph::from_tasks(&tasks);

    assert_eq!(sorted(&graph.upstream("A")), vec!["B", "C"]);
    assert_eq!(sorted(&graph.downstream("A")), vec!["B", "C"]);
    assert!(graph.roots().is_empty());
}

#[test]
fn very_long_chain_does_not_exhaust_the_stack() {
    init_tracing();

    let ids: Vec<String> = (0..50_000).map(|i| format!("t{i}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
    let mut tasks = chain(&id_refs);
    tasks.reverse();

    let graph = TaskGraph::from_tasks(&tasks);
    assert!(graph.detect_cycles().is_empty());
    assert_eq!(graph.upstream("t49999").len(), 49_999);

    let analyzer = DependencyAnalyzer::new(&tasks);
    let depths = analyzer.depth_map();
    assert_eq!(depths["t49999"], 50_000);
    assert_eq!(depths["t0"], 1);

    let order = analyzer.topological_order();
    assert_eq!(order["t0"], 0);
    assert_eq!(order["t49999"], 49_999);

    assert_eq!(analyzer.critical_path_from(&depths).len(), 50_000);
}

#[test]
fn duplicate_ids_keep_the_last_record() {
    init_tracing();

    let tasks = vec![
        TaskBuilder::new("A").title("first").build(),
        TaskBuilder::new("B").build(),
        TaskBuilder::new("A").title("second").after("B").build(),
    ];
    let graph = TaskGraph::from_tasks(&tasks);

    assert_eq!(graph.len(), 2);
    assert_eq!(graph.get("A").unwrap().title, "second");
    assert_eq!(graph.task_ids().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(graph.dependencies_of("A"), ["B".to_string()]);
}
