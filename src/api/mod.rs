//! Admin API access layer
//!
//! Client side of the activity tracker's admin HTTP API.
//!
//! # Endpoints
//!
//! - `POST /admin/auth/login` - Admin authentication, body `{email, password}`
//! - `GET /admin/users` - List users
//! - `GET /admin/activities` - List activities
//! - `GET /admin/stats` - Aggregate stats
//! - `DELETE /admin/activities/{id}` - Delete one activity
//!
//! All paths are relative to the configured base URL. Requests carry
//! `Accept`/`Content-Type: application/json` and, when a token is available,
//! `Authorization: Bearer <token>`.
//!
//! # Example
//!
//! ```rust,no_run
//! use fitpanel::api::{ApiClient, ApiClientConfig, ApiExecutor, RequestOptions};
//! use fitpanel::models::AdminStats;
//! use fitpanel::notifications::NotificationCenter;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ApiClient::new(ApiClientConfig::new("http://localhost:8000/api"));
//!     let executor = ApiExecutor::new(Arc::new(NotificationCenter::new()));
//!     let token = || Some("my-token".to_string());
//!
//!     executor
//!         .execute(
//!             || client.fetch_with_auth("/admin/stats", &token, RequestOptions::get()),
//!             "Failed to fetch statistics.",
//!             |stats: AdminStats| println!("{} users", stats.users_number),
//!         )
//!         .await;
//! }
//! ```

pub mod client;
pub mod error;
pub mod executor;

pub use client::{
    ApiClient, ApiClientConfig, NoToken, RequestOptions, TokenProvider, DEFAULT_API_BASE,
};
pub use error::{handle_api_error, ApiError, ApiResult, NOT_FOUND_MESSAGE, UNAUTHORIZED_MESSAGE};
pub use executor::{ApiExecutor, BusyGuard};
