// navigation.rs — Week label, navigation intents, and the Me/Team toggle.
//
// The navigator never does date arithmetic on its own behalf: previous and
// next are forwarded to a NavigationHandler, and the caller decides what a
// "week back" means (usually NavIntent::apply, i.e. -7 days).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{saturating_add, WeekKey};
use crate::error::WeekError;

pub const PREVIOUS_WEEK_TOOLTIP: &str = "Previous Week";
pub const NEXT_WEEK_TOOLTIP: &str = "Next Week";

/// Separator between the two segments of a month-transition label.
pub const TRANSITION_SEPARATOR: &str = "-";

/// Human-readable label for a week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekLabel {
    /// The week and the following week start in the same month: `"Mar 2024"`.
    Single(String),
    /// The week straddles a month boundary: `"Feb"` then `"Mar 2024"`.
    ///
    /// Only the second segment carries a year, even for Dec → Jan.
    Transition { primary: String, secondary: String },
}

impl WeekLabel {
    pub fn is_transition(&self) -> bool {
        matches!(self, WeekLabel::Transition { .. })
    }

    /// The label split into its displayed segments (one or two).
    pub fn segments(&self) -> Vec<&str> {
        match self {
            WeekLabel::Single(label) => vec![label.as_str()],
            WeekLabel::Transition { primary, secondary } => {
                vec![primary.as_str(), secondary.as_str()]
            }
        }
    }
}

impl fmt::Display for WeekLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekLabel::Single(label) => write!(f, "{}", label),
            WeekLabel::Transition { primary, secondary } => {
                write!(f, "{} {} {}", primary, TRANSITION_SEPARATOR, secondary)
            }
        }
    }
}

fn month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

fn month_only(date: NaiveDate) -> String {
    date.format("%b").to_string()
}

/// Label a week by comparing its start month with the month one week later.
pub fn render_label(week_start: WeekKey) -> WeekLabel {
    let current = week_start.start();
    match current.checked_add_signed(Duration::weeks(1)) {
        Some(next_week) if next_week.month() != current.month() => WeekLabel::Transition {
            primary: month_only(current),
            secondary: month_year(next_week),
        },
        // The last week of the calendar has no following week to compare with.
        _ => WeekLabel::Single(month_year(current)),
    }
}

/// A request to move one week back or forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavIntent {
    Previous,
    Next,
}

impl NavIntent {
    /// Translate the intent into a new reference date (±7 days), clamped
    /// at the calendar's ends.
    pub fn apply(self, date: NaiveDate) -> NaiveDate {
        match self {
            NavIntent::Previous => saturating_add(date, -Duration::weeks(1)),
            NavIntent::Next => saturating_add(date, Duration::weeks(1)),
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            NavIntent::Previous => PREVIOUS_WEEK_TOOLTIP,
            NavIntent::Next => NEXT_WEEK_TOOLTIP,
        }
    }
}

/// Whose goals the board shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewScope {
    /// The signed-in user's own goals.
    #[default]
    Me,
    /// Every team member's goals.
    Team,
}

impl ViewScope {
    /// Caption of the toggle button for this scope.
    pub fn tab_label(self) -> &'static str {
        match self {
            ViewScope::Me => "Me",
            ViewScope::Team => "Team",
        }
    }
}

impl fmt::Display for ViewScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewScope::Me => write!(f, "me"),
            ViewScope::Team => write!(f, "team"),
        }
    }
}

impl FromStr for ViewScope {
    type Err = WeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "me" | "self" => Ok(ViewScope::Me),
            "team" => Ok(ViewScope::Team),
            _ => Err(WeekError::UnknownScope(s.to_string())),
        }
    }
}

/// Receiver of the navigator's intents.
///
/// The owner of the reference date implements this. `set_scope` is called
/// for every selection, including re-selecting the active scope.
pub trait NavigationHandler {
    fn on_previous_week(&mut self);
    fn on_next_week(&mut self);
    fn set_scope(&mut self, scope: ViewScope);
}

/// The week navigator: label plus intents, bound to a handler.
#[derive(Debug)]
pub struct WeekNavigation<H> {
    week_start: WeekKey,
    active_scope: ViewScope,
    handler: H,
}

impl<H: NavigationHandler> WeekNavigation<H> {
    pub fn new(week_start: WeekKey, active_scope: ViewScope, handler: H) -> Self {
        Self {
            week_start,
            active_scope,
            handler,
        }
    }

    pub fn label(&self) -> WeekLabel {
        render_label(self.week_start)
    }

    pub fn week_start(&self) -> WeekKey {
        self.week_start
    }

    /// Point the navigator at the week the caller settled on.
    pub fn set_week_start(&mut self, week_start: WeekKey) {
        self.week_start = week_start;
    }

    pub fn previous(&mut self) {
        tracing::debug!(week = %self.week_start, "previous week requested");
        self.handler.on_previous_week();
    }

    pub fn next(&mut self) {
        tracing::debug!(week = %self.week_start, "next week requested");
        self.handler.on_next_week();
    }

    /// Forward `intent` to the matching handler callback.
    pub fn dispatch(&mut self, intent: NavIntent) {
        match intent {
            NavIntent::Previous => self.previous(),
            NavIntent::Next => self.next(),
        }
    }

    /// Select a scope. The setter always runs, even when `scope` is active.
    pub fn select_scope(&mut self, scope: ViewScope) {
        self.handler.set_scope(scope);
        self.active_scope = scope;
    }

    pub fn active_scope(&self) -> ViewScope {
        self.active_scope
    }

    /// Whether the toggle button for `scope` is highlighted.
    pub fn is_active(&self, scope: ViewScope) -> bool {
        self.active_scope == scope
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}
