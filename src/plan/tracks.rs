// src/plan/tracks.rs

//! Parallel work tracks.
//!
//! Actionable tasks that touch a common scope conflict and belong to the same
//! track. Tasks and scopes are joined in a union-find structure; every
//! connected component that contains a scope becomes one track. Tasks that
//! touch nothing are "flexible" and can go anywhere.

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::unionfind::UnionFind;
use serde::Serialize;
use tracing::{debug, warn};

use crate::dag::DependencyAnalyzer;
use crate::plan::actionable_candidates;
use crate::plan::filter::Filter;
use crate::task::Task;

/// Inputs for [`assign_tracks`].
#[derive(Debug, Clone, Default)]
pub struct TrackOptions {
    /// Candidate filters, applied before the actionability check.
    pub filters: Vec<Filter>,
    /// Recognized scope names. When set, other scopes produce warnings.
    pub known_scopes: Option<BTreeSet<String>>,
    /// Maximum number of tracks returned. Flexible tasks are never cut.
    pub limit: Option<usize>,
}

/// A group of tasks that share scopes and should be worked sequentially.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    /// 1-based, in order of discovery.
    pub id: usize,
    /// Sorted union of member scopes.
    pub scopes: Vec<String>,
    /// Members in input order.
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackAssignment {
    pub tracks: Vec<Track>,
    pub flexible: Vec<Task>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Partition actionable tasks into conflict-free tracks.
pub fn assign_tracks(tasks: &[Task], opts: &TrackOptions) -> TrackAssignment {
    let analyzer = DependencyAnalyzer::new(tasks);
    let actionable = actionable_candidates(tasks, &opts.filters, &analyzer);

    let warnings = match opts.known_scopes.as_ref() {
        Some(known) => unknown_scope_warnings(&actionable, known),
        None => Vec::new(),
    };

    let (scoped, flexible): (Vec<&Task>, Vec<&Task>) = actionable
        .into_iter()
        .partition(|t| !t.touches.is_empty());

    let mut tracks = group_by_scope(&scoped);
    let total_tracks = tracks.len();
    if let Some(limit) = opts.limit {
        tracks.truncate(limit);
    }

    debug!(
        tracks = total_tracks,
        returned = tracks.len(),
        flexible = flexible.len(),
        warnings = warnings.len(),
        "assigned tracks"
    );

    TrackAssignment {
        tracks,
        flexible: flexible.into_iter().cloned().collect(),
        warnings,
    }
}

/// Connected components over the task/scope bipartite graph.
///
/// Node `i < tasks.len()` is the i-th task; scope nodes follow.
fn group_by_scope(tasks: &[&Task]) -> Vec<Track> {
    let mut scope_nodes: HashMap<&str, usize> = HashMap::new();
    for task in tasks {
        for scope in task.touches.iter() {
            let next = tasks.len() + scope_nodes.len();
            scope_nodes.entry(scope.as_str()).or_insert(next);
        }
    }

    let mut sets: UnionFind<usize> = UnionFind::new(tasks.len() + scope_nodes.len());
    for (i, task) in tasks.iter().enumerate() {
        for scope in task.touches.iter() {
            if let Some(&node) = scope_nodes.get(scope.as_str()) {
                sets.union(i, node);
            }
        }
    }

    let mut track_of: HashMap<usize, usize> = HashMap::new();
    let mut tracks: Vec<Track> = Vec::new();
    let mut scopes: Vec<BTreeSet<String>> = Vec::new();

    for (i, task) in tasks.iter().enumerate() {
        let component = sets.find_mut(i);
        let idx = *track_of.entry(component).or_insert_with(|| {
            tracks.push(Track {
                id: tracks.len() + 1,
                scopes: Vec::new(),
                tasks: Vec::new(),
            });
            scopes.push(BTreeSet::new());
            tracks.len() - 1
        });

        tracks[idx].tasks.push((*task).clone());
        scopes[idx].extend(task.touches.iter().cloned());
    }

    for (track, scope_set) in tracks.iter_mut().zip(scopes) {
        track.scopes = scope_set.into_iter().collect();
    }

    tracks
}

fn unknown_scope_warnings(tasks: &[&Task], known: &BTreeSet<String>) -> Vec<String> {
    let mut warnings = Vec::new();

    for task in tasks {
        let mut seen: HashSet<&str> = HashSet::new();
        for scope in task.touches.iter() {
            if known.contains(scope) || !seen.insert(scope.as_str()) {
                continue;
            }
            warn!(task = %task.id, scope = %scope, "task touches unknown scope");
            warnings.push(format!("task {}: unknown scope \"{}\"", task.id, scope));
        }
    }

    warnings
}
