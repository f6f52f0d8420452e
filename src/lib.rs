//! # Fitpanel
//!
//! Admin client for the activity tracker API. Authenticates an operator,
//! fetches users, activities and aggregate statistics, keeps them in shared
//! in-memory caches and reports every outcome as a transient notification.
//!
//! ## Modules
//!
//! - [`api`]: HTTP client, error classification and the call executor
//! - [`session`]: session storage and the auth session store
//! - [`store`]: cached users / activities / stats
//! - [`notifications`]: auto-expiring notification list
//! - [`models`]: API data types
//! - [`format`]: display helpers
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fitpanel::{AppContext, Config, MemoryStorage};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = AppContext::new(&Config::from_env(), Arc::new(MemoryStorage::new()));
//!
//!     if ctx.auth.admin_login("admin@example.com", "secret").await {
//!         ctx.admin.load_all().await;
//!         println!(
//!             "{} users, {} activities",
//!             ctx.admin.total_users(),
//!             ctx.admin.total_activities()
//!         );
//!     }
//!
//!     for note in ctx.notifications.notifications() {
//!         println!("[{}] {}", note.severity, note.message);
//!     }
//! }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod format;
pub mod models;
pub mod notifications;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Re-export top-level types for convenience
pub use app::AppContext;
pub use config::Config;
pub use notifications::{Notification, NotificationCenter, Severity};
pub use session::{AuthStore, FileStorage, MemoryStorage, SessionStorage};
pub use store::{DashboardStore, StoreScope};
