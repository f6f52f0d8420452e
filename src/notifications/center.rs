//! Expiring notification list backed by one tokio timer task per entry.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::task::AbortHandle;
use uuid::Uuid;

/// Default lifetime of a notification in milliseconds
pub const DEFAULT_TTL_MS: u64 = 3000;

/// Unique identifier for a notification
pub type NotificationId = String;

/// How a notification should be presented
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Success,
    Info,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Success => write!(f, "success"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single transient message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    #[serde(rename = "type")]
    pub severity: Severity,
}

/// Returned by [`NotificationCenter::add`]
///
/// Aborting `timer` keeps the entry alive until it is removed explicitly.
#[derive(Debug, Clone)]
pub struct Scheduled {
    pub id: NotificationId,
    pub timer: AbortHandle,
}

#[derive(Default)]
struct CenterState {
    entries: Vec<Notification>,
    timers: HashMap<NotificationId, AbortHandle>,
}

/// Shared list of active notifications
///
/// Construct once, wrap in `Arc`, and hand to every component that reports
/// results. [`add`](Self::add) spawns a timer task, so it must run inside a
/// tokio runtime.
pub struct NotificationCenter {
    state: Arc<Mutex<CenterState>>,
    ttl: Duration,
}

impl NotificationCenter {
    /// Create a center with the default 3 second lifetime
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_millis(DEFAULT_TTL_MS))
    }

    /// Create a center with a custom lifetime
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(CenterState::default())),
            ttl,
        }
    }

    /// Lifetime applied to new notifications
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Append a notification and schedule its removal
    pub fn add(&self, message: impl Into<String>, severity: Severity) -> Scheduled {
        let id = next_id();
        let notification = Notification {
            id: id.clone(),
            message: message.into(),
            severity,
        };

        tracing::debug!(
            notification_id = %id,
            severity = %severity,
            message = %notification.message,
            "Notification added"
        );

        let mut state = lock(&self.state);
        state.entries.push(notification);

        let weak = Arc::downgrade(&self.state);
        let ttl = self.ttl;
        let task_id = id.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            expire(&weak, &task_id);
        })
        .abort_handle();

        state.timers.insert(id.clone(), timer.clone());

        Scheduled { id, timer }
    }

    /// Shorthand for an error notification
    pub fn show_error(&self, message: impl Into<String>) -> Scheduled {
        self.add(message, Severity::Error)
    }

    /// Shorthand for a success notification
    pub fn show_success(&self, message: impl Into<String>) -> Scheduled {
        self.add(message, Severity::Success)
    }

    /// Shorthand for an info notification
    pub fn show_info(&self, message: impl Into<String>) -> Scheduled {
        self.add(message, Severity::Info)
    }

    /// Shorthand for a warning notification
    pub fn show_warning(&self, message: impl Into<String>) -> Scheduled {
        self.add(message, Severity::Warning)
    }

    /// Remove a notification and cancel its pending expiry
    ///
    /// No-op for unknown ids.
    pub fn remove(&self, id: &str) {
        let mut state = lock(&self.state);
        state.entries.retain(|n| n.id != id);
        if let Some(timer) = state.timers.remove(id) {
            timer.abort();
            tracing::debug!(notification_id = %id, "Notification removed");
        }
    }

    /// Active notifications, oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.state).entries.clone()
    }

    /// Number of active notifications
    pub fn len(&self) -> usize {
        lock(&self.state).entries.len()
    }

    /// Whether no notification is active
    pub fn is_empty(&self) -> bool {
        lock(&self.state).entries.is_empty()
    }

    /// Number of expiry timers still pending
    pub fn pending_timers(&self) -> usize {
        lock(&self.state).timers.len()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Timer callback: drop the entry and its own bookkeeping
fn expire(state: &Weak<Mutex<CenterState>>, id: &str) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = lock(&state);
    state.entries.retain(|n| n.id != id);
    state.timers.remove(id);
    tracing::trace!(notification_id = %id, "Notification expired");
}

fn lock(state: &Mutex<CenterState>) -> MutexGuard<'_, CenterState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Millisecond timestamp followed by a short random suffix
fn next_id() -> NotificationId {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}{}", Utc::now().timestamp_millis(), &suffix[..9])
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_keeps_order() {
        let center = NotificationCenter::new();
        center.show_error("first");
        center.show_success("second");
        center.add("third", Severity::Info);

        let messages: Vec<_> = center
            .notifications()
            .into_iter()
            .map(|n| (n.message, n.severity))
            .collect();
        assert_eq!(
            messages,
            vec![
                ("first".to_string(), Severity::Error),
                ("second".to_string(), Severity::Success),
                ("third".to_string(), Severity::Info),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_after_ttl() {
        let center = NotificationCenter::new();
        center.show_warning("soon gone");

        tokio::time::sleep(Duration::from_millis(2999)).await;
        settle().await;
        assert_eq!(center.len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        settle().await;
        assert!(center.is_empty());
        assert_eq!(center.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_cancels_timer() {
        let center = NotificationCenter::new();
        let scheduled = center.show_error("dismissed");
        let kept = center.show_info("kept");

        center.remove(&scheduled.id);
        assert_eq!(center.len(), 1);
        assert_eq!(center.pending_timers(), 1);

        // Removing again is a no-op
        center.remove(&scheduled.id);
        assert_eq!(center.notifications()[0].id, kept.id);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        settle().await;
        assert!(center.is_empty());
        assert_eq!(center.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_timer_keeps_entry() {
        let center = NotificationCenter::with_ttl(Duration::from_millis(100));
        let scheduled = center.show_info("sticky");
        scheduled.timer.abort();

        tokio::time::sleep(Duration::from_millis(500)).await;
        settle().await;
        assert_eq!(center.len(), 1);

        center.remove(&scheduled.id);
        assert!(center.is_empty());
        assert_eq!(center.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_are_unique() {
        let center = NotificationCenter::new();
        let a = center.show_error("a");
        let b = center.show_error("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_default_severity_is_error() {
        assert_eq!(Severity::default(), Severity::Error);
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
