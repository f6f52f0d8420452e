//! API Call Executor
//!
//! Runs one admin API call with a shared busy flag and uniform reporting:
//! successes hand decoded data to a callback, failures become error
//! notifications. Nothing is re-raised to the caller.

use reqwest::Response;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::error::{handle_api_error, ApiError};
use crate::notifications::NotificationCenter;

/// Clears the busy flag when dropped
///
/// Covers early returns, panics and futures dropped mid-flight.
#[must_use = "the busy flag is cleared as soon as the guard is dropped"]
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self {
            flag: Arc::clone(flag),
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Executes API calls against one busy flag
///
/// Overlapping calls share the flag; the first one to finish clears it
/// while the others are still in flight.
pub struct ApiExecutor {
    loading: Arc<AtomicBool>,
    notifications: Arc<NotificationCenter>,
}

impl ApiExecutor {
    pub fn new(notifications: Arc<NotificationCenter>) -> Self {
        Self {
            loading: Arc::new(AtomicBool::new(false)),
            notifications,
        }
    }

    /// Whether a call is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Set the busy flag for a call managed by the caller
    pub fn busy(&self) -> BusyGuard {
        BusyGuard::acquire(&self.loading)
    }

    /// Notification sink used for failures
    pub fn notifications(&self) -> &Arc<NotificationCenter> {
        &self.notifications
    }

    /// Run `call`, decode a 2xx body into `T` and pass it to `on_success`
    ///
    /// Returns whether `on_success` ran. Non-2xx responses, transport errors
    /// and undecodable bodies are reported as error notifications, with
    /// `error_message` as the fallback text.
    pub async fn execute<T, C, Fut, S>(&self, call: C, error_message: &str, on_success: S) -> bool
    where
        T: DeserializeOwned,
        C: FnOnce() -> Fut,
        Fut: Future<Output = Result<Response, ApiError>>,
        S: FnOnce(T),
    {
        let _busy = self.busy();

        let response = match call().await {
            Ok(response) => response,
            Err(e) => {
                self.report(&e, error_message);
                return false;
            }
        };

        if !response.status().is_success() {
            let error = handle_api_error(response, error_message).await;
            self.report(&error, error_message);
            return false;
        }

        match response.json::<T>().await {
            Ok(data) => {
                on_success(data);
                true
            }
            Err(e) => {
                self.report(&ApiError::Decode(e.to_string()), error_message);
                false
            }
        }
    }

    /// Log a failure and show it as an error notification
    pub fn report(&self, error: &ApiError, default_message: &str) {
        let message = error.user_message(default_message);
        tracing::warn!(
            status = ?error.status(),
            error = %error,
            "API call failed"
        );
        self.notifications.show_error(message);
    }
}
