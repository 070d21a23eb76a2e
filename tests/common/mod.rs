#![allow(dead_code)]

use std::collections::{BTreeSet, HashSet};

pub use taskmd_test_utils::init_tracing;

use taskmd::{Effort, Priority, Task};
use taskmd_test_utils::builders::TaskBuilder;

/// Collect IDs into a sorted set for order-insensitive comparisons.
pub fn id_set<I, S>(ids: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter().map(|s| s.as_ref().to_string()).collect()
}

pub fn sorted(set: &HashSet<String>) -> Vec<String> {
    let mut out: Vec<String> = set.iter().cloned().collect();
    out.sort();
    out
}

/// Seven-task project used across the planning tests.
///
/// `001 <- 002 <- 004`, `001 <- 003`, `007 <- 006`, `005` standalone.
/// `001` and `002` are completed.
pub fn sample_project() -> Vec<Task> {
    vec![
        TaskBuilder::new("001")
            .completed()
            .priority(Priority::High)
            .effort(Effort::Small)
            .build(),
        TaskBuilder::new("002")
            .completed()
            .priority(Priority::Medium)
            .effort(Effort::Medium)
            .after("001")
            .build(),
        TaskBuilder::new("003")
            .priority(Priority::Critical)
            .effort(Effort::Small)
            .after("001")
            .build(),
        TaskBuilder::new("004")
            .priority(Priority::High)
            .effort(Effort::Large)
            .after("002")
            .build(),
        TaskBuilder::new("005")
            .priority(Priority::Low)
            .effort(Effort::Small)
            .build(),
        TaskBuilder::new("006")
            .priority(Priority::High)
            .effort(Effort::Medium)
            .after("007")
            .build(),
        TaskBuilder::new("007")
            .priority(Priority::Medium)
            .effort(Effort::Small)
            .build(),
    ]
}
