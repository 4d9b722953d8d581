//! Toast notifications.
//!
//! The view layer pushes a toast after a store operation succeeds ("Added to
//! wishlist") and drives expiry from its own timer through
//! [`ToastStore::prune_expired`]. Toasts are never persisted.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use uuid::Uuid;

/// Unique toast identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(Uuid);

impl ToastId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

/// A notification awaiting display or expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Queue of active toasts, oldest first.
pub struct ToastStore {
    toasts: watch::Sender<Vec<Toast>>,
    duration: Duration,
    limit: usize,
}

impl ToastStore {
    /// Create a store whose toasts live for `duration`, with at most `limit`
    /// active at once (at least one).
    #[must_use]
    pub fn new(duration: Duration, limit: usize) -> Self {
        let (toasts, _) = watch::channel(Vec::new());
        Self {
            toasts,
            duration,
            limit: limit.max(1),
        }
    }

    /// Show a toast. The oldest toasts are dropped beyond the limit.
    pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> ToastId {
        let toast = Toast {
            id: ToastId::generate(),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        };
        let id = toast.id;

        self.toasts.send_modify(|toasts| {
            toasts.push(toast);
            let overflow = toasts.len().saturating_sub(self.limit);
            toasts.drain(..overflow);
        });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.push(ToastKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.push(ToastKind::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.push(ToastKind::Info, message)
    }

    /// Remove a toast. Returns whether it was still active.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.toasts.send_if_modified(|toasts| {
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            toasts.len() != before
        })
    }

    /// Remove toasts that have been shown for at least the configured
    /// duration as of `now`. Returns how many were removed.
    pub fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.toasts.send_if_modified(|toasts| {
            let before = toasts.len();
            toasts.retain(|t| {
                (now - t.created_at)
                    .to_std()
                    .map_or(true, |age| age < self.duration)
            });
            removed = before - toasts.len();
            removed > 0
        });
        removed
    }

    /// Active toasts, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    /// Receiver notified whenever the active set changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.toasts.subscribe()
    }
}
