//! Session Handling
//!
//! - **storage**: session-scoped key-value store (in-memory or JSON file)
//! - **auth**: user/admin login flags and the admin bearer token
//! - **error**: storage error types
//!
//! Persisted keys mirror the dashboard's browser storage: `isLoggedIn`,
//! `isAdminLoggedIn` (`"true"` or absent) and `adminToken`.

pub mod auth;
pub mod error;
pub mod storage;

pub use auth::{
    AuthStore, ADMIN_FLAG_KEY, ADMIN_LOGIN_PATH, ADMIN_TOKEN_KEY, FALLBACK_ADMIN_TOKEN,
    INVALID_CREDENTIALS_MESSAGE, LOGGED_IN_KEY,
};
pub use error::{StorageError, StorageResult};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
