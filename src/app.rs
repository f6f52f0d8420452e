//! Application Context
//!
//! Wires the shared components together once. Every consumer receives the
//! same `Arc`s, so they observe one notification list, one session and one
//! cache per store.

use std::sync::Arc;
use std::time::Duration;

use crate::api::{ApiClient, ApiClientConfig, TokenProvider};
use crate::config::Config;
use crate::notifications::NotificationCenter;
use crate::session::{AuthStore, SessionStorage};
use crate::store::{DashboardStore, StoreScope};

/// Shared client state
#[derive(Clone)]
pub struct AppContext {
    /// Transient messages reported by every operation
    pub notifications: Arc<NotificationCenter>,
    /// Admin API client
    pub client: Arc<ApiClient>,
    /// Login flags and admin token
    pub auth: Arc<AuthStore>,
    /// Cache behind the general data views
    pub data: Arc<DashboardStore>,
    /// Cache behind the admin views
    pub admin: Arc<DashboardStore>,
}

impl AppContext {
    /// Build all components from configuration over the given storage
    ///
    /// Session flags are re-derived from storage before returning.
    pub fn new(config: &Config, storage: Arc<dyn SessionStorage>) -> Self {
        let notifications = Arc::new(NotificationCenter::with_ttl(Duration::from_millis(
            config.notifications.ttl_ms,
        )));
        let client = Arc::new(ApiClient::new(ApiClientConfig::new(
            config.api.base_url.clone(),
        )));
        let auth = Arc::new(AuthStore::new(
            storage,
            Arc::clone(&client),
            Arc::clone(&notifications),
        ));
        auth.check_auth_status();
        auth.check_admin_auth_status();

        let tokens: Arc<dyn TokenProvider> = auth.clone();
        let data = Arc::new(DashboardStore::new(
            StoreScope::general().with_prefix(config.stores.general_prefix.clone()),
            Arc::clone(&client),
            Arc::clone(&tokens),
            Arc::clone(&notifications),
        ));
        let admin = Arc::new(DashboardStore::new(
            StoreScope::admin().with_prefix(config.stores.admin_prefix.clone()),
            Arc::clone(&client),
            tokens,
            Arc::clone(&notifications),
        ));

        tracing::debug!(base_url = %client.config().base_url, "Application context ready");

        Self {
            notifications,
            client,
            auth,
            data,
            admin,
        }
    }
}
