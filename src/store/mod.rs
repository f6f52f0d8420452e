//! Dashboard Stores
//!
//! Shared caches of users, activities and aggregate stats. One
//! [`DashboardStore`] type serves both the general data views and the admin
//! views; a [`StoreScope`] picks the endpoint prefix and whether the admin
//! token is sent.

mod dashboard;

pub use dashboard::{DashboardStore, StoreScope, ACTIVITY_DELETED_MESSAGE, DEFAULT_PREFIX};
