//! Auth Session Store
//!
//! Two independent sessions share one storage:
//!
//! ```text
//! user:  LoggedOut --login()--> LoggedIn --logout()--> LoggedOut
//! admin: LoggedOut --admin_login() ok--> LoggedIn --admin_logout()--> LoggedOut
//! ```
//!
//! In-memory flags are re-derived from storage by the `check_*` methods.
//! The admin session counts as logged in only when the stored flag is
//! `"true"` and a non-empty token is stored next to it.

use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::storage::SessionStorage;
use crate::api::{handle_api_error, ApiClient, ApiError, RequestOptions, TokenProvider};
use crate::notifications::NotificationCenter;

/// Storage key of the user session flag
pub const LOGGED_IN_KEY: &str = "isLoggedIn";
/// Storage key of the admin session flag
pub const ADMIN_FLAG_KEY: &str = "isAdminLoggedIn";
/// Storage key of the admin bearer token
pub const ADMIN_TOKEN_KEY: &str = "adminToken";

/// Admin authentication endpoint
pub const ADMIN_LOGIN_PATH: &str = "/admin/auth/login";

/// Token stored when the login response names none
pub const FALLBACK_ADMIN_TOKEN: &str = "admin-token";

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";
const LOGIN_FAILED_MESSAGE: &str = "Invalid login data.";
const LOGIN_ERROR_MESSAGE: &str = "An error occurred while logging in.";
const ADMIN_LOGGED_IN_MESSAGE: &str = "Logged in as administrator.";

const FLAG_TRUE: &str = "true";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, rename = "accessToken")]
    access_token: Option<String>,
}

/// Login flags and admin token for the running client
pub struct AuthStore {
    storage: Arc<dyn SessionStorage>,
    client: Arc<ApiClient>,
    notifications: Arc<NotificationCenter>,
    logged_in: AtomicBool,
    admin_logged_in: AtomicBool,
}

impl AuthStore {
    /// Create a store; flags start false until a `check_*` call
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        client: Arc<ApiClient>,
        notifications: Arc<NotificationCenter>,
    ) -> Self {
        Self {
            storage,
            client,
            notifications,
            logged_in: AtomicBool::new(false),
            admin_logged_in: AtomicBool::new(false),
        }
    }

    /// In-memory user flag
    pub fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::SeqCst)
    }

    /// In-memory admin flag
    pub fn is_admin_logged_in(&self) -> bool {
        self.admin_logged_in.load(Ordering::SeqCst)
    }

    /// Re-derive the user flag from storage
    pub fn check_auth_status(&self) -> bool {
        let logged_in = self.storage.get_item(LOGGED_IN_KEY).as_deref() == Some(FLAG_TRUE);
        self.logged_in.store(logged_in, Ordering::SeqCst);
        logged_in
    }

    /// Re-derive the admin flag from storage (flag AND non-empty token)
    pub fn check_admin_auth_status(&self) -> bool {
        let flag = self.storage.get_item(ADMIN_FLAG_KEY).as_deref() == Some(FLAG_TRUE);
        let has_token = self
            .storage
            .get_item(ADMIN_TOKEN_KEY)
            .is_some_and(|t| !t.is_empty());

        let logged_in = flag && has_token;
        self.admin_logged_in.store(logged_in, Ordering::SeqCst);
        logged_in
    }

    /// Mark the user session as logged in; no network call
    pub fn login(&self) {
        self.logged_in.store(true, Ordering::SeqCst);
        self.persist(LOGGED_IN_KEY, Some(FLAG_TRUE));
        tracing::info!("User session started");
    }

    /// End the user session
    pub fn logout(&self) {
        self.logged_in.store(false, Ordering::SeqCst);
        self.persist(LOGGED_IN_KEY, None);
        tracing::info!("User session ended");
    }

    /// Authenticate against the admin endpoint
    ///
    /// Returns true on success. Every failure is reported as a notification
    /// and leaves the session untouched.
    pub async fn admin_login(&self, email: &str, password: &str) -> bool {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = match self
            .client
            .fetch(ADMIN_LOGIN_PATH, RequestOptions::post(body))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.report(&e, LOGIN_ERROR_MESSAGE);
                return false;
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::info!(email = %email, "Admin login rejected");
            self.notifications.show_error(INVALID_CREDENTIALS_MESSAGE);
            return false;
        }
        if !status.is_success() {
            let error = handle_api_error(response, LOGIN_FAILED_MESSAGE).await;
            self.report(&error, LOGIN_FAILED_MESSAGE);
            return false;
        }

        let data: LoginResponse = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                self.report(&ApiError::Decode(e.to_string()), LOGIN_ERROR_MESSAGE);
                return false;
            }
        };

        let token = data
            .token
            .or(data.access_token)
            .unwrap_or_else(|| FALLBACK_ADMIN_TOKEN.to_string());

        self.admin_logged_in.store(true, Ordering::SeqCst);
        self.persist(ADMIN_FLAG_KEY, Some(FLAG_TRUE));
        self.persist(ADMIN_TOKEN_KEY, Some(&token));

        tracing::info!(email = %email, "Admin logged in");
        self.notifications.show_success(ADMIN_LOGGED_IN_MESSAGE);
        true
    }

    /// End the admin session and forget the token
    pub fn admin_logout(&self) {
        self.admin_logged_in.store(false, Ordering::SeqCst);
        self.persist(ADMIN_FLAG_KEY, None);
        self.persist(ADMIN_TOKEN_KEY, None);
        tracing::info!("Admin session ended");
    }

    /// Token straight from storage, regardless of the in-memory flag
    pub fn get_admin_token(&self) -> Option<String> {
        self.storage.get_item(ADMIN_TOKEN_KEY)
    }

    fn persist(&self, key: &str, value: Option<&str>) {
        let result = match value {
            Some(value) => self.storage.set_item(key, value),
            None => self.storage.remove_item(key),
        };
        if let Err(e) = result {
            tracing::warn!(key = %key, error = %e, "Failed to persist session state");
        }
    }

    fn report(&self, error: &ApiError, default_message: &str) {
        tracing::warn!(error = %error, "Admin login failed");
        self.notifications
            .show_error(error.user_message(default_message));
    }
}

impl TokenProvider for AuthStore {
    fn token(&self) -> Option<String> {
        self.get_admin_token()
    }
}
