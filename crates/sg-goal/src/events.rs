// events.rs — Board events and their dispatch to sinks.
//
// The board emits an event after each store mutation it performed and on
// scope changes. Sinks (a JSONL activity log, a test recorder) subscribe by
// being added to the dispatcher. A failing sink is logged and skipped; it
// never affects the board's own state transitions.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sg_week::{ViewScope, WeekKey};

use crate::error::GoalError;
use crate::goal::Goal;

/// Events emitted by the goal board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum BoardEvent {
    /// A goal was added to a week.
    GoalCreated {
        goal_id: String,
        owner: String,
        week: WeekKey,
        text: String,
        timestamp: DateTime<Utc>,
    },

    /// A goal's text, description, or color was edited.
    GoalUpdated {
        goal_id: String,
        text: String,
        timestamp: DateTime<Utc>,
    },

    /// A goal was marked done or reopened.
    GoalCompletionToggled {
        goal_id: String,
        completed: bool,
        timestamp: DateTime<Utc>,
    },

    /// A goal was removed.
    GoalDeleted {
        goal_id: String,
        timestamp: DateTime<Utc>,
    },

    /// The board switched between the user's own and the team's goals.
    ScopeChanged {
        user: String,
        week: WeekKey,
        scope: ViewScope,
        timestamp: DateTime<Utc>,
    },
}

impl BoardEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            BoardEvent::GoalCreated { .. } => "goal_created",
            BoardEvent::GoalUpdated { .. } => "goal_updated",
            BoardEvent::GoalCompletionToggled { .. } => "goal_completion_toggled",
            BoardEvent::GoalDeleted { .. } => "goal_deleted",
            BoardEvent::ScopeChanged { .. } => "scope_changed",
        }
    }

    pub fn goal_created(goal: &Goal) -> Self {
        BoardEvent::GoalCreated {
            goal_id: goal.id.clone(),
            owner: goal.owner.clone(),
            week: goal.week,
            text: goal.text.clone(),
            timestamp: Utc::now(),
        }
    }

    pub fn goal_updated(goal_id: &str, text: &str) -> Self {
        BoardEvent::GoalUpdated {
            goal_id: goal_id.to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn completion_toggled(goal_id: &str, completed: bool) -> Self {
        BoardEvent::GoalCompletionToggled {
            goal_id: goal_id.to_string(),
            completed,
            timestamp: Utc::now(),
        }
    }

    pub fn goal_deleted(goal_id: &str) -> Self {
        BoardEvent::GoalDeleted {
            goal_id: goal_id.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn scope_changed(user: &str, week: WeekKey, scope: ViewScope) -> Self {
        BoardEvent::ScopeChanged {
            user: user.to_string(),
            week,
            scope,
            timestamp: Utc::now(),
        }
    }
}

/// Receiver of board events.
pub trait EventSink {
    /// Handle an event. Errors are logged but don't stop the board.
    fn send(&self, event: &BoardEvent) -> Result<(), GoalError>;
}

/// Appends events as JSON lines to a file.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl EventSink for JsonlSink {
    fn send(&self, event: &BoardEvent) -> Result<(), GoalError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| GoalError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Dispatches events to every registered sink.
#[derive(Default)]
pub struct EventDispatcher {
    sinks: Vec<Box<dyn EventSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn dispatch(&self, event: &BoardEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!(event = event.event_type(), "event sink error: {}", e);
            }
        }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}
