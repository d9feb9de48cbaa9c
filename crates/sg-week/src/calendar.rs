// calendar.rs — WeekKey derivation and the layout-dependent active week.
//
// A week is identified by the date of its first day. Which day comes first
// is a convention (Sunday by default). The active week depends on the
// layout: wide layouts trust the week start their parent passes down,
// narrow layouts re-anchor on the reference day every time.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::WeekError;
use crate::navigation::NavIntent;

/// Format used for WeekKeys everywhere (storage, CLI, logs).
pub const WEEK_KEY_FORMAT: &str = "%Y-%m-%d";

/// Which weekday opens a calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// The weekday every WeekKey under this convention falls on.
    pub fn first_day(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => write!(f, "sunday"),
            WeekStart::Monday => write!(f, "monday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = WeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            _ => Err(WeekError::UnknownWeekStart(s.to_string())),
        }
    }
}

/// Canonical identifier of a calendar week: the date of its first day.
///
/// Serializes as `"YYYY-MM-DD"`, the same text `Display` produces, so a
/// WeekKey can be used directly as a file name or a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    /// The week containing `date` under the given convention.
    pub fn containing(date: NaiveDate, week_start: WeekStart) -> Self {
        week_start_of(date, week_start)
    }

    /// Wrap a date that the caller already knows is a week start.
    ///
    /// No normalization happens here: a parent-supplied week start is
    /// passed through verbatim on wide layouts.
    pub fn from_start(start: NaiveDate) -> Self {
        Self(start)
    }

    /// First day of the week.
    pub fn start(&self) -> NaiveDate {
        self.0
    }

    /// Last day of the week (start + 6 days), clamped to the last representable day.
    pub fn end(&self) -> NaiveDate {
        saturating_add(self.0, Duration::days(6))
    }

    /// Whether `date` falls inside this week.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    /// The week `weeks` weeks away (negative goes back), clamped at the calendar's ends.
    pub fn shifted(&self, weeks: i64) -> Self {
        match Duration::try_weeks(weeks) {
            Some(delta) => Self(saturating_add(self.0, delta)),
            None if weeks < 0 => Self(NaiveDate::MIN),
            None => Self(NaiveDate::MAX),
        }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WEEK_KEY_FORMAT))
    }
}

impl FromStr for WeekKey {
    type Err = WeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let start = NaiveDate::parse_from_str(s.trim(), WEEK_KEY_FORMAT).map_err(|source| {
            WeekError::InvalidDate {
                input: s.to_string(),
                source,
            }
        })?;
        // The week before and the week after must both exist.
        let neighbours = start.checked_sub_signed(Duration::weeks(1)).is_some()
            && start.checked_add_signed(Duration::days(13)).is_some();
        if !neighbours {
            return Err(WeekError::OutOfRange(s.trim().to_string()));
        }
        Ok(WeekKey(start))
    }
}

/// `date + delta`, clamped to `NaiveDate::MIN..=NaiveDate::MAX`.
pub(crate) fn saturating_add(date: NaiveDate, delta: Duration) -> NaiveDate {
    match date.checked_add_signed(delta) {
        Some(d) => d,
        None if delta < Duration::zero() => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}

/// The week start at or before `date`.
///
/// In the first days of the calendar the week start would precede
/// `NaiveDate::MIN`; the key is clamped to `NaiveDate::MIN` there.
pub fn week_start_of(date: NaiveDate, week_start: WeekStart) -> WeekKey {
    let today = date.weekday().num_days_from_sunday();
    let first = week_start.first_day().num_days_from_sunday();
    let back = (7 + today - first) % 7;
    WeekKey(saturating_add(date, -Duration::days(i64::from(back))))
}

/// The week the goal board should show.
///
/// Wide layouts return `explicit_week_start` untouched. Narrow layouts
/// ignore it and derive the week from `reference_day`.
pub fn effective_week(
    reference_day: NaiveDate,
    is_wide_layout: bool,
    explicit_week_start: WeekKey,
    week_start: WeekStart,
) -> WeekKey {
    if is_wide_layout {
        explicit_week_start
    } else {
        week_start_of(reference_day, week_start)
    }
}

/// The three inputs of [`effective_week`], held together.
///
/// Nothing is cached: every read re-derives the key from the current
/// inputs, so a changed input can never leave a stale week behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveWeek {
    reference_day: NaiveDate,
    wide_layout: bool,
    explicit_week_start: WeekKey,
    week_start: WeekStart,
}

impl ActiveWeek {
    pub fn new(
        reference_day: NaiveDate,
        wide_layout: bool,
        explicit_week_start: WeekKey,
        week_start: WeekStart,
    ) -> Self {
        Self {
            reference_day,
            wide_layout,
            explicit_week_start,
            week_start,
        }
    }

    /// Start from a single day: the parent week start is the week containing it.
    pub fn anchored_on(reference_day: NaiveDate, wide_layout: bool, week_start: WeekStart) -> Self {
        Self::new(
            reference_day,
            wide_layout,
            WeekKey::containing(reference_day, week_start),
            week_start,
        )
    }

    /// The effective WeekKey for the current inputs.
    pub fn key(&self) -> WeekKey {
        effective_week(
            self.reference_day,
            self.wide_layout,
            self.explicit_week_start,
            self.week_start,
        )
    }

    pub fn reference_day(&self) -> NaiveDate {
        self.reference_day
    }

    pub fn is_wide_layout(&self) -> bool {
        self.wide_layout
    }

    pub fn explicit_week_start(&self) -> WeekKey {
        self.explicit_week_start
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn set_reference_day(&mut self, day: NaiveDate) -> WeekKey {
        self.reference_day = day;
        self.rederive("reference_day")
    }

    pub fn set_wide_layout(&mut self, wide: bool) -> WeekKey {
        self.wide_layout = wide;
        self.rederive("wide_layout")
    }

    pub fn set_explicit_week_start(&mut self, key: WeekKey) -> WeekKey {
        self.explicit_week_start = key;
        self.rederive("explicit_week_start")
    }

    /// Apply a navigation intent the way a parent would: move both the
    /// reference day and the parent week start by one week.
    pub fn navigate(&mut self, intent: NavIntent) -> WeekKey {
        self.reference_day = intent.apply(self.reference_day);
        self.explicit_week_start = WeekKey::from_start(intent.apply(self.explicit_week_start.start()));
        self.rederive("navigate")
    }

    fn rederive(&self, changed: &str) -> WeekKey {
        let key = self.key();
        tracing::trace!(changed, week = %key, wide = self.wide_layout, "active week re-derived");
        key
    }
}
