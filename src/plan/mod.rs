// src/plan/mod.rs

//! Work planning on top of the dependency analysis.
//!
//! - [`filter`] parses and evaluates `field=value` filters.
//! - [`recommend`] scores and ranks what to work on next.
//! - [`tracks`] partitions actionable work into conflict-free tracks.
//!
//! Both planners share [`is_actionable`] and apply filters before it.

pub mod filter;
pub mod recommend;
pub mod tracks;

pub use filter::{Filter, FilterField};
pub use recommend::{Recommendation, RecommendOptions, recommend};
pub use tracks::{Track, TrackAssignment, TrackOptions, assign_tracks};

use tracing::debug;

use crate::dag::DependencyAnalyzer;
use crate::task::Task;

/// A task can be picked up when it is pending or in progress and every
/// dependency is loaded and completed.
pub fn is_actionable(task: &Task, analyzer: &DependencyAnalyzer<'_>) -> bool {
    task.status.is_open() && !analyzer.has_unmet_dependencies(task)
}

/// Filtered, actionable tasks in input order.
///
/// Dependency satisfaction is judged against the full task set held by
/// `analyzer`, not only the filtered candidates.
pub(crate) fn actionable_candidates<'a>(
    tasks: &'a [Task],
    filters: &[Filter],
    analyzer: &DependencyAnalyzer<'_>,
) -> Vec<&'a Task> {
    let candidates = filter::apply(tasks, filters);
    let total = candidates.len();

    let actionable: Vec<&Task> = candidates
        .into_iter()
        .filter(|t| is_actionable(t, analyzer))
        .collect();

    debug!(
        candidates = total,
        actionable = actionable.len(),
        filters = filters.len(),
        "selected actionable tasks"
    );
    actionable
}
