// mod.rs — Shared command context: config, active week, and board wiring.

pub mod goal;
pub mod menu;
pub mod stats;
pub mod week;

use std::path::Path;

use anyhow::Context as _;
use chrono::{Local, NaiveDate};
use sg_goal::{
    BoardConfig, EventDispatcher, GoalBoard, GoalQuery, JsonGoalStore, JsonlSink, Notifier, Toast,
};
use sg_week::{ActiveWeek, ViewScope, WeekStart};

/// Everything a command needs: resolved config and the active week.
pub struct Context {
    pub config: BoardConfig,
    pub active: ActiveWeek,
}

impl Context {
    pub fn new(
        project_root: &Path,
        user: Option<String>,
        date: Option<NaiveDate>,
        narrow: bool,
        first_day: Option<WeekStart>,
    ) -> anyhow::Result<Self> {
        let mut config = BoardConfig::for_project(project_root)
            .with_context(|| format!("loading config under {}", project_root.display()))?;
        if let Some(user) = user {
            config.user = user;
        }
        if let Some(first_day) = first_day {
            config.week_start = first_day;
        }
        if narrow {
            config.wide_layout = false;
        }

        let reference_day = date.unwrap_or_else(|| Local::now().date_naive());
        let active = ActiveWeek::anchored_on(reference_day, config.wide_layout, config.week_start);
        tracing::debug!(user = %config.user, week = %active.key(), "context ready");

        Ok(Self { config, active })
    }

    pub fn query(&self, scope: ViewScope) -> GoalQuery {
        GoalQuery::new(&self.config.user, self.active.key()).with_scope(scope)
    }

    /// A board over the JSON store, logging activity to the events file.
    pub fn board(&self, scope: ViewScope) -> anyhow::Result<GoalBoard<JsonGoalStore, TerminalNotifier>> {
        let store = JsonGoalStore::new(&self.config.data_dir)
            .with_context(|| format!("opening goal store {}", self.config.data_dir.display()))?;
        let mut events = EventDispatcher::new();
        events.add_sink(Box::new(JsonlSink::new(&self.config.events_log)));
        Ok(GoalBoard::new(store, TerminalNotifier, self.query(scope)).with_events(events))
    }
}

/// Prints toasts to stdout.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, toast: Toast) {
        println!("{} {}", toast.title, toast.description);
    }
}

/// Shorten `s` to at most `max` characters, marking the cut with "…".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
