// stats.rs — Weekly statistics over a goal list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::goal::Goal;

/// Completion counts for one week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeekStats {
    pub total: usize,
    pub completed: usize,
    pub open: usize,
    /// Completed share, rounded down. 0 for an empty week.
    pub percent_complete: u8,
}

impl WeekStats {
    pub fn from_goals<'a>(goals: impl IntoIterator<Item = &'a Goal>) -> Self {
        let mut stats = WeekStats::default();
        for goal in goals {
            stats.total += 1;
            if goal.completed {
                stats.completed += 1;
            }
        }
        stats.open = stats.total - stats.completed;
        stats.percent_complete = if stats.total == 0 {
            0
        } else {
            (stats.completed * 100 / stats.total) as u8
        };
        stats
    }
}

/// Per-owner statistics, for team views.
pub fn stats_by_owner(goals: &[Goal]) -> BTreeMap<String, WeekStats> {
    let mut grouped: BTreeMap<String, Vec<&Goal>> = BTreeMap::new();
    for goal in goals {
        grouped.entry(goal.owner.clone()).or_default().push(goal);
    }
    grouped
        .into_iter()
        .map(|(owner, goals)| (owner, WeekStats::from_goals(goals)))
        .collect()
}
