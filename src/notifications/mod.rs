//! Notification Center
//!
//! Transient, auto-expiring messages reported by every boundary operation
//! (loads, deletes, logins). Entries are kept oldest first and removed
//! after a fixed delay or on explicit request, whichever comes first.

mod center;

pub use center::{
    Notification, NotificationCenter, NotificationId, Scheduled, Severity, DEFAULT_TTL_MS,
};
