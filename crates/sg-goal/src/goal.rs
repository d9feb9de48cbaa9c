// goal.rs — Goal: one weekly goal, plus the swatch palette.
//
// A goal belongs to one user and one week. The board only ever holds a
// transient copy; the store owns the record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sg_week::WeekKey;
use uuid::Uuid;

/// Swatches offered by the color picker, in picker order.
pub const PALETTE: [&str; 12] = [
    "#FFB6C1", // light pink
    "#FFD700", // gold
    "#FFA500", // orange
    "#87CEFA", // light sky blue
    "#6495ED", // cornflower blue
    "#3CB371", // medium sea green
    "#f4eec2",
    "#ea8c87",
    "#b795ec",
    "#f9fafa",
    "#D8BFD8", // thistle
    "#20B2AA", // light sea green
];

/// Color shown for a goal that has no swatch yet.
pub const DEFAULT_SWATCH: &str = "#FFFFFF";

/// A goal's background color.
///
/// Any string is accepted and stored verbatim, so swatches written by a
/// newer palette survive a round trip. Only the picker is limited to
/// [`PALETTE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Swatch(String);

impl Swatch {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the picker offers this swatch (case-insensitive).
    pub fn is_in_palette(&self) -> bool {
        PALETTE.iter().any(|p| p.eq_ignore_ascii_case(&self.0))
    }

    /// The color to paint: the swatch itself, or white when unset.
    pub fn display_color(&self) -> &str {
        if self.0.is_empty() {
            DEFAULT_SWATCH
        } else {
            &self.0
        }
    }

    /// All picker swatches.
    pub fn palette() -> impl Iterator<Item = Swatch> {
        PALETTE.iter().map(|p| Swatch::new(*p))
    }
}

impl From<&str> for Swatch {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Swatch {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One goal on the weekly board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier (a UUID v4 in the bundled stores).
    pub id: String,

    /// Short label shown on the board.
    pub text: String,

    /// Free-text details.
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub color: Swatch,

    #[serde(default)]
    pub completed: bool,

    /// User the goal belongs to.
    pub owner: String,

    /// Week the goal is planned for.
    pub week: WeekKey,

    /// Creation time; orders merged team listings.
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Create an open goal with a fresh id.
    pub fn new(
        owner: impl Into<String>,
        week: WeekKey,
        text: impl Into<String>,
        description: impl Into<String>,
        color: Swatch,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            description: description.into(),
            color,
            completed: false,
            owner: owner.into(),
            week,
            created_at: Utc::now(),
        }
    }
}
