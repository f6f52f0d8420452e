//! Admin API data model
//!
//! Snapshots returned by the admin endpoints:
//! - `User`: account and profile fields
//! - `Activity`: a recorded workout with an embedded copy of its owner
//! - `AdminStats`: aggregate counters for the dashboard header
//!
//! All types are read-only on the client. Caches replace them wholesale on reload.

mod activity;
mod stats;
mod user;

pub use activity::{Activity, ActivityKind};
pub use stats::AdminStats;
pub use user::User;
