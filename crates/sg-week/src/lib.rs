//! # sg-week
//!
//! Week arithmetic and week navigation for Sprint Goals.
//!
//! Goals are partitioned by calendar week. A week is identified by a
//! [`WeekKey`], the date of its first day under a [`WeekStart`] convention.
//!
//! ## Key components
//!
//! - [`effective_week`] / [`ActiveWeek`]: which week the board shows, given a
//!   reference day, the layout, and a parent-supplied week start
//! - [`render_label`]: `"Mar 2024"` or `"Feb - Mar 2024"` for a week
//! - [`WeekNavigation`]: previous/next intents and the Me/Team toggle,
//!   forwarded to a [`NavigationHandler`]
//! - [`ProgressMenu`]: header menu entries (My Week, Share, Statistics)

pub mod calendar;
pub mod error;
pub mod menu;
pub mod navigation;

pub use calendar::{effective_week, week_start_of, ActiveWeek, WeekKey, WeekStart};
pub use error::WeekError;
pub use menu::{MenuAction, MenuOutcome, ProgressMenu};
pub use navigation::{
    render_label, NavIntent, NavigationHandler, ViewScope, WeekLabel, WeekNavigation,
};
