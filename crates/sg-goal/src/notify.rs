// notify.rs — User-visible toasts and the Notifier capability.
//
// The board never reaches for a global toast function. It holds a Notifier
// and calls it synchronously; tests pass a fake, front-ends pass a
// ToastQueue or their own renderer.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How long a toast stays up unless dismissed.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(5);

pub const GOAL_DELETED_TITLE: &str = "Goal deleted.";
pub const GOAL_DELETED_DESCRIPTION: &str = "Your goal has been deleted successfully.";

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub level: ToastLevel,
    /// Auto-dismiss delay. `None` means it stays until dismissed.
    pub duration: Option<Duration>,
    /// Whether the user may dismiss it by hand.
    pub closable: bool,
}

impl Toast {
    pub fn new(level: ToastLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level,
            duration: Some(DEFAULT_TOAST_DURATION),
            closable: true,
        }
    }

    /// The confirmation shown after a goal is deleted.
    pub fn goal_deleted() -> Self {
        Self::new(ToastLevel::Success, GOAL_DELETED_TITLE, GOAL_DELETED_DESCRIPTION)
    }
}

/// Something that can show a toast to the user.
pub trait Notifier {
    fn notify(&mut self, toast: Toast);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, toast: Toast) {
        (**self).notify(toast);
    }
}

/// A toast on screen.
#[derive(Debug, Clone)]
pub struct ActiveToast {
    pub id: u64,
    pub toast: Toast,
    pub shown_at: Instant,
}

impl ActiveToast {
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.toast.duration {
            Some(duration) => now.saturating_duration_since(self.shown_at) >= duration,
            None => false,
        }
    }
}

/// Toasts currently on screen, newest first.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: VecDeque<ActiveToast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `toast` as of `now`. Returns its id for later dismissal.
    pub fn push_at(&mut self, toast: Toast, now: Instant) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push_front(ActiveToast {
            id,
            toast,
            shown_at: now,
        });
        id
    }

    /// Drop every toast whose duration has elapsed by `now`.
    pub fn expire_at(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.is_expired(now));
    }

    /// Dismiss a toast by hand. Non-closable toasts stay up.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let Some(pos) = self.toasts.iter().position(|t| t.id == id) else {
            return false;
        };
        if !self.toasts[pos].toast.closable {
            return false;
        }
        self.toasts.remove(pos);
        true
    }

    pub fn visible(&self) -> impl Iterator<Item = &ActiveToast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, toast: Toast) {
        self.push_at(toast, Instant::now());
    }
}
