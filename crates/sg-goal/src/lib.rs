//! # sg-goal
//!
//! The weekly goal board for Sprint Goals.
//!
//! A [`GoalBoard`] shows the goals a [`GoalStore`] returns for a
//! [`GoalQuery`] (user, week, scope) and runs the goal editor: create,
//! update, toggle completion, delete. Store calls are fire-and-forget; the
//! editor always closes on submit and delete, and a deleted goal is
//! confirmed through the injected [`Notifier`].
//!
//! ## Key components
//!
//! - [`GoalBoard`]: the editor state machine (Closed ⇄ Editing)
//! - [`GoalStore`]: the goal source, with [`MemoryGoalStore`] and
//!   [`JsonGoalStore`] implementations
//! - [`Notifier`] / [`ToastQueue`]: user-visible toasts
//! - [`BoardEvent`] / [`EventDispatcher`]: activity events for sinks
//! - [`BoardConfig`]: `.sg/config.toml`
//! - [`WeekStats`]: weekly completion statistics

pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod goal;
pub mod notify;
pub mod stats;
pub mod store;

pub use board::{GoalBoard, GoalForm, Selection, SelectionState, BOARD_HEADING};
pub use config::BoardConfig;
pub use error::GoalError;
pub use events::{BoardEvent, EventDispatcher, EventSink, JsonlSink};
pub use goal::{Goal, Swatch, PALETTE};
pub use notify::{Notifier, Toast, ToastLevel, ToastQueue};
pub use stats::{stats_by_owner, WeekStats};
pub use store::{GoalQuery, GoalStore, JsonGoalStore, MemoryGoalStore};
