// src/plan/recommend.rs

//! "What should I work on next?"
//!
//! Actionable tasks are scored from priority, effort, critical-path
//! membership and how much work they unblock, then ranked by score
//! (descending) with ties broken by ID (ascending).

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::dag::{DependencyAnalyzer, TaskGraph};
use crate::plan::actionable_candidates;
use crate::plan::filter::Filter;
use crate::task::{Task, TaskId};
use crate::types::{Effort, Priority, Status};

pub const SCORE_PRIORITY_CRITICAL: u32 = 40;
pub const SCORE_PRIORITY_HIGH: u32 = 30;
pub const SCORE_PRIORITY_MEDIUM: u32 = 20;
pub const SCORE_PRIORITY_LOW: u32 = 10;
pub const SCORE_CRITICAL_PATH: u32 = 15;
pub const SCORE_PER_DOWNSTREAM: u32 = 3;
pub const SCORE_DOWNSTREAM_MAX: u32 = 15;
pub const SCORE_EFFORT_SMALL: u32 = 5;

/// Inputs for [`recommend`].
#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    /// Maximum number of results, applied after ranking.
    pub limit: Option<usize>,
    /// Candidate filters, applied before the actionability check.
    pub filters: Vec<Filter>,
    /// Only small-effort tasks.
    pub quick_wins: bool,
    /// Only tasks on the critical path.
    pub critical_only: bool,
}

/// One ranked suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub rank: usize,
    pub id: TaskId,
    pub title: String,
    pub status: Status,
    pub priority: Priority,
    pub effort: Effort,
    pub score: u32,
    pub reasons: Vec<String>,
    pub downstream_count: usize,
    pub on_critical_path: bool,
}

/// Score a task and explain the contributing factors.
pub fn score_task(task: &Task, on_critical_path: bool, downstream_count: usize) -> (u32, Vec<String>) {
    let mut score = 0;
    let mut reasons = Vec::new();

    match task.priority {
        Priority::Critical => {
            score += SCORE_PRIORITY_CRITICAL;
            reasons.push("critical priority".to_string());
        }
        Priority::High => {
            score += SCORE_PRIORITY_HIGH;
            reasons.push("high priority".to_string());
        }
        Priority::Medium => score += SCORE_PRIORITY_MEDIUM,
        Priority::Low | Priority::Unset => score += SCORE_PRIORITY_LOW,
    }

    if on_critical_path {
        score += SCORE_CRITICAL_PATH;
        reasons.push("on critical path".to_string());
    }

    if downstream_count > 0 {
        let units = u32::try_from(downstream_count).unwrap_or(u32::MAX);
        score += units
            .saturating_mul(SCORE_PER_DOWNSTREAM)
            .min(SCORE_DOWNSTREAM_MAX);
        let noun = if downstream_count == 1 { "task" } else { "tasks" };
        reasons.push(format!("unblocks {downstream_count} {noun}"));
    }

    if task.effort == Effort::Small {
        score += SCORE_EFFORT_SMALL;
        reasons.push("quick win".to_string());
    }

    (score, reasons)
}

/// Rank actionable tasks.
///
/// Critical path and downstream counts are always computed over the full
/// `tasks` slice, even when filters narrow the candidates.
pub fn recommend(tasks: &[Task], opts: &RecommendOptions) -> Vec<Recommendation> {
    let analyzer = DependencyAnalyzer::new(tasks);
    let critical_path: BTreeSet<TaskId> = analyzer.critical_path_tasks();
    let downstream_counts = TaskGraph::from_tasks(tasks).downstream_counts();

    let mut candidates = actionable_candidates(tasks, &opts.filters, &analyzer);
    if opts.quick_wins {
        candidates.retain(|t| t.effort == Effort::Small);
    }
    if opts.critical_only {
        candidates.retain(|t| critical_path.contains(&t.id));
    }

    let mut scored: Vec<(&Task, u32, Vec<String>)> = candidates
        .into_iter()
        .map(|task| {
            let downstream = downstream_counts.get(&task.id).copied().unwrap_or(0);
            let (score, reasons) =
                score_task(task, critical_path.contains(&task.id), downstream);
            (task, score, reasons)
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));

    if let Some(limit) = opts.limit {
        scored.truncate(limit);
    }

    debug!(
        results = scored.len(),
        limit = ?opts.limit,
        quick_wins = opts.quick_wins,
        critical_only = opts.critical_only,
        "ranked recommendations"
    );

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (task, score, reasons))| Recommendation {
            rank: i + 1,
            id: task.id.clone(),
            title: task.title.clone(),
            status: task.status,
            priority: task.priority,
            effort: task.effort,
            score,
            reasons,
            downstream_count: downstream_counts.get(&task.id).copied().unwrap_or(0),
            on_critical_path: critical_path.contains(&task.id),
        })
        .collect()
}
