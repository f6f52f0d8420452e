//! Users / activities / stats cache populated from the admin API.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::api::{
    handle_api_error, ApiClient, ApiExecutor, NoToken, RequestOptions, TokenProvider,
};
use crate::models::{Activity, ActivityKind, AdminStats, User};
use crate::notifications::NotificationCenter;

/// Endpoint prefix served by the deployed API for both scopes
pub const DEFAULT_PREFIX: &str = "/admin";

pub const ACTIVITY_DELETED_MESSAGE: &str = "Activity deleted.";
const USERS_FAILED_MESSAGE: &str = "Failed to fetch users.";
const ACTIVITIES_FAILED_MESSAGE: &str = "Failed to fetch activities.";
const STATS_FAILED_MESSAGE: &str = "Failed to fetch statistics.";
const DELETE_FAILED_MESSAGE: &str = "Failed to delete activity.";
const DELETE_ERROR_MESSAGE: &str = "An error occurred while deleting the activity.";

/// Which endpoints a store talks to and whether it sends the admin token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreScope {
    /// Label used in logs
    pub name: String,
    /// Prefix prepended to `/users`, `/activities` and `/stats`
    pub prefix: String,
    /// Send the bearer token from the token provider
    pub authorized: bool,
}

impl StoreScope {
    /// General data views
    pub fn general() -> Self {
        Self {
            name: "data".to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            authorized: true,
        }
    }

    /// Admin views
    pub fn admin() -> Self {
        Self {
            name: "admin".to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            authorized: true,
        }
    }

    /// Builder method: set the endpoint prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder method: never send a token
    pub fn unauthorized(mut self) -> Self {
        self.authorized = false;
        self
    }

    /// Full API path for an endpoint under this scope
    pub fn path(&self, endpoint: &str) -> String {
        format!("{}{}", self.prefix, endpoint)
    }
}

/// Shared cache of users, activities and stats
///
/// Loads replace a cache only on success; failures are reported through
/// the notification center and leave the previous contents in place.
pub struct DashboardStore {
    scope: StoreScope,
    client: Arc<ApiClient>,
    tokens: Arc<dyn TokenProvider>,
    executor: ApiExecutor,
    users: RwLock<Vec<User>>,
    activities: RwLock<Vec<Activity>>,
    stats: RwLock<Option<AdminStats>>,
}

impl DashboardStore {
    pub fn new(
        scope: StoreScope,
        client: Arc<ApiClient>,
        tokens: Arc<dyn TokenProvider>,
        notifications: Arc<NotificationCenter>,
    ) -> Self {
        Self {
            scope,
            client,
            tokens,
            executor: ApiExecutor::new(notifications),
            users: RwLock::new(Vec::new()),
            activities: RwLock::new(Vec::new()),
            stats: RwLock::new(None),
        }
    }

    pub fn scope(&self) -> &StoreScope {
        &self.scope
    }

    fn token_source(&self) -> &dyn TokenProvider {
        if self.scope.authorized {
            self.tokens.as_ref()
        } else {
            &NoToken
        }
    }

    /// Replace the user cache from `{prefix}/users`
    pub async fn load_users(&self) -> bool {
        let path = self.scope.path("/users");
        let loaded = self
            .executor
            .execute(
                || {
                    self.client
                        .fetch_with_auth(&path, self.token_source(), RequestOptions::get())
                },
                USERS_FAILED_MESSAGE,
                |data: Vec<User>| *write(&self.users) = data,
            )
            .await;

        if loaded {
            tracing::info!(scope = %self.scope.name, count = read(&self.users).len(), "Users loaded");
        }
        loaded
    }

    /// Replace the activity cache from `{prefix}/activities`
    pub async fn load_activities(&self) -> bool {
        let path = self.scope.path("/activities");
        let loaded = self
            .executor
            .execute(
                || {
                    self.client
                        .fetch_with_auth(&path, self.token_source(), RequestOptions::get())
                },
                ACTIVITIES_FAILED_MESSAGE,
                |data: Vec<Activity>| *write(&self.activities) = data,
            )
            .await;

        if loaded {
            tracing::info!(
                scope = %self.scope.name,
                count = read(&self.activities).len(),
                "Activities loaded"
            );
        }
        loaded
    }

    /// Replace the stats from `{prefix}/stats`
    pub async fn load_stats(&self) -> bool {
        let path = self.scope.path("/stats");
        let loaded = self
            .executor
            .execute(
                || {
                    self.client
                        .fetch_with_auth(&path, self.token_source(), RequestOptions::get())
                },
                STATS_FAILED_MESSAGE,
                |data: AdminStats| *write(&self.stats) = Some(data),
            )
            .await;

        if loaded {
            tracing::info!(scope = %self.scope.name, "Stats loaded");
        }
        loaded
    }

    /// Load stats, users and activities one after another
    ///
    /// Every load runs even if an earlier one fails. Returns whether all
    /// three succeeded.
    pub async fn load_all(&self) -> bool {
        let stats = self.load_stats().await;
        let users = self.load_users().await;
        let activities = self.load_activities().await;
        stats && users && activities
    }

    /// Delete one activity on the server and drop it from the cache
    ///
    /// The cache entry is matched by comparing the id as text. The list is
    /// not re-fetched.
    pub async fn delete_activity(&self, id: &str) -> bool {
        let _busy = self.executor.busy();
        let path = self
            .scope
            .path(&format!("/activities/{}", urlencoding::encode(id)));

        let response = match self
            .client
            .fetch_with_auth(&path, self.token_source(), RequestOptions::delete())
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.executor.report(&e, DELETE_ERROR_MESSAGE);
                return false;
            }
        };

        if !response.status().is_success() {
            let error = handle_api_error(response, DELETE_FAILED_MESSAGE).await;
            self.executor.report(&error, DELETE_FAILED_MESSAGE);
            return false;
        }

        let removed = {
            let mut activities = write(&self.activities);
            let before = activities.len();
            activities.retain(|activity| activity.id.to_string() != id);
            before - activities.len()
        };

        tracing::info!(
            scope = %self.scope.name,
            activity_id = %id,
            removed,
            "Activity deleted"
        );
        self.executor
            .notifications()
            .show_success(ACTIVITY_DELETED_MESSAGE);
        true
    }

    /// Cached users
    pub fn users(&self) -> Vec<User> {
        read(&self.users).clone()
    }

    /// Cached activities
    pub fn activities(&self) -> Vec<Activity> {
        read(&self.activities).clone()
    }

    /// Cached stats, if loaded
    pub fn stats(&self) -> Option<AdminStats> {
        read(&self.stats).clone()
    }

    /// Whether a call of this store is in flight
    pub fn is_loading(&self) -> bool {
        self.executor.is_loading()
    }

    pub fn total_users(&self) -> u64 {
        read(&self.stats).as_ref().map_or(0, |s| s.users_number)
    }

    pub fn total_activities(&self) -> u64 {
        read(&self.stats).as_ref().map_or(0, |s| s.activities_number)
    }

    /// Summed distance in meters
    pub fn total_distance(&self) -> f64 {
        read(&self.stats).as_ref().map_or(0.0, |s| s.distance_summary)
    }

    /// Users whose name, surname or email contains `query`
    pub fn search_users(&self, query: &str) -> Vec<User> {
        read(&self.users)
            .iter()
            .filter(|u| u.matches(query))
            .cloned()
            .collect()
    }

    pub fn activities_of_kind(&self, kind: ActivityKind) -> Vec<Activity> {
        self.activities_matching(Some(kind), None)
    }

    pub fn activities_of_user(&self, user_id: u64) -> Vec<Activity> {
        self.activities_matching(None, Some(user_id))
    }

    /// Cached activities, narrowed by kind and owner when given
    pub fn activities_matching(
        &self,
        kind: Option<ActivityKind>,
        user_id: Option<u64>,
    ) -> Vec<Activity> {
        read(&self.activities)
            .iter()
            .filter(|a| kind.map_or(true, |k| a.activity_type == k))
            .filter(|a| user_id.map_or(true, |u| a.user_id == u))
            .cloned()
            .collect()
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClientConfig;
    use crate::notifications::Severity;
    use crate::testing::{self, activity_json, user_json};
    use axum::{
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Response},
        routing::{delete, get},
        Json, Router,
    };
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockApi {
        fail: AtomicBool,
        deletes: Mutex<Vec<String>>,
        authorization: Mutex<Vec<Option<String>>>,
    }

    impl MockApi {
        fn record(&self, headers: &HeaderMap) {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            self.authorization.lock().unwrap().push(auth);
        }

        fn failure(&self) -> Option<Response> {
            self.fail.load(Ordering::SeqCst).then(|| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"message": "Database offline"})),
                )
                    .into_response()
            })
        }
    }

    async fn users(State(api): State<Arc<MockApi>>, headers: HeaderMap) -> Response {
        api.record(&headers);
        if let Some(failure) = api.failure() {
            return failure;
        }
        Json(serde_json::json!([
            user_json(1, "Anna", "anna@example.com"),
            user_json(2, "Jan", "jan@example.com"),
        ]))
        .into_response()
    }

    async fn activities(State(api): State<Arc<MockApi>>, headers: HeaderMap) -> Response {
        api.record(&headers);
        if let Some(failure) = api.failure() {
            return failure;
        }
        Json(serde_json::json!([
            activity_json(10, 1, "run", 5230.0),
            activity_json(11, 1, "ride", 20400.0),
            activity_json(12, 2, "run", 3100.0),
        ]))
        .into_response()
    }

    async fn stats(State(api): State<Arc<MockApi>>, headers: HeaderMap) -> Response {
        api.record(&headers);
        if let Some(failure) = api.failure() {
            return failure;
        }
        Json(serde_json::json!({
            "users_number": 2,
            "activities_number": 3,
            "distance_summary": 28730.0
        }))
        .into_response()
    }

    async fn delete_activity(
        State(api): State<Arc<MockApi>>,
        Path(id): Path<String>,
        headers: HeaderMap,
    ) -> StatusCode {
        api.record(&headers);
        api.deletes.lock().unwrap().push(id.clone());
        match id.as_str() {
            "404" => StatusCode::NOT_FOUND,
            "500" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::NO_CONTENT,
        }
    }

    async fn setup(scope: StoreScope) -> (DashboardStore, Arc<MockApi>) {
        let api = Arc::new(MockApi::default());
        let router = Router::new()
            .route("/api/admin/users", get(users))
            .route("/api/admin/activities", get(activities))
            .route("/api/admin/stats", get(stats))
            .route("/api/admin/activities/:id", delete(delete_activity))
            .with_state(Arc::clone(&api));
        let base = testing::serve(router).await;

        let store = DashboardStore::new(
            scope,
            Arc::new(ApiClient::new(ApiClientConfig::new(base))),
            Arc::new(|| Some("tok-1".to_string())),
            Arc::new(NotificationCenter::new()),
        );
        (store, api)
    }

    fn notes(store: &DashboardStore) -> Vec<crate::notifications::Notification> {
        store.executor.notifications().notifications()
    }

    #[test]
    fn test_scope_paths() {
        let scope = StoreScope::admin();
        assert_eq!(scope.path("/users"), "/admin/users");

        let scope = StoreScope::general().with_prefix("/v2/");
        assert_eq!(scope.path("/stats"), "/v2/stats");
        assert!(scope.authorized);
        assert!(!scope.unauthorized().authorized);
    }

    #[tokio::test]
    async fn test_totals_default_to_zero() {
        let (store, _api) = setup(StoreScope::admin()).await;
        assert_eq!(store.total_users(), 0);
        assert_eq!(store.total_activities(), 0);
        assert_eq!(store.total_distance(), 0.0);
        assert!(store.stats().is_none());

        assert!(store.load_stats().await);
        assert_eq!(store.total_users(), 2);
        assert_eq!(store.total_activities(), 3);
        assert_eq!(store.total_distance(), 28730.0);
    }

    #[tokio::test]
    async fn test_load_all_fills_caches() {
        let (store, api) = setup(StoreScope::general()).await;

        assert!(store.load_all().await);
        assert_eq!(store.users().len(), 2);
        assert_eq!(store.activities().len(), 3);
        assert!(!store.is_loading());
        assert!(notes(&store).is_empty());

        let auth = api.authorization.lock().unwrap().clone();
        assert_eq!(auth.len(), 3);
        assert!(auth.iter().all(|a| a.as_deref() == Some("Bearer tok-1")));
    }

    #[tokio::test]
    async fn test_unauthorized_scope_sends_no_token() {
        let (store, api) = setup(StoreScope::general().unauthorized()).await;
        assert!(store.load_users().await);
        assert_eq!(api.authorization.lock().unwrap()[0], None);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_cache() {
        let (store, api) = setup(StoreScope::admin()).await;
        assert!(store.load_users().await);

        api.fail.store(true, Ordering::SeqCst);
        assert!(!store.load_users().await);
        assert_eq!(store.users().len(), 2);

        let notes = notes(&store);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Database offline");
    }

    #[tokio::test]
    async fn test_delete_removes_only_that_activity() {
        let (store, api) = setup(StoreScope::admin()).await;
        store.load_activities().await;

        assert!(store.delete_activity("11").await);
        let ids: Vec<u64> = store.activities().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![10, 12]);
        assert_eq!(api.deletes.lock().unwrap().as_slice(), ["11"]);
        assert!(!store.is_loading());

        let notes = notes(&store);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, ACTIVITY_DELETED_MESSAGE);
        assert_eq!(notes[0].severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_delete_absent_id_still_calls_server() {
        let (store, api) = setup(StoreScope::admin()).await;
        store.load_activities().await;

        assert!(store.delete_activity("999").await);
        assert_eq!(store.activities().len(), 3);
        assert_eq!(api.deletes.lock().unwrap().as_slice(), ["999"]);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_cache() {
        let (store, _api) = setup(StoreScope::admin()).await;
        store.load_activities().await;

        assert!(!store.delete_activity("404").await);
        assert!(!store.delete_activity("500").await);
        assert_eq!(store.activities().len(), 3);

        let notes = notes(&store);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].message, crate::api::NOT_FOUND_MESSAGE);
        assert_eq!(notes[1].message, DELETE_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_delete_unreachable_server() {
        let store = DashboardStore::new(
            StoreScope::admin(),
            Arc::new(ApiClient::new(ApiClientConfig::new(testing::dead_base_url()))),
            Arc::new(NoToken),
            Arc::new(NotificationCenter::new()),
        );

        assert!(!store.delete_activity("1").await);
        assert!(!store.is_loading());
        assert_eq!(notes(&store).len(), 1);
    }

    #[tokio::test]
    async fn test_filters() {
        let (store, _api) = setup(StoreScope::admin()).await;
        store.load_users().await;
        store.load_activities().await;

        assert_eq!(store.search_users("JAN").len(), 1);
        assert_eq!(store.search_users("example.com").len(), 2);
        assert_eq!(store.activities_of_kind(ActivityKind::Run).len(), 2);
        assert_eq!(store.activities_of_kind(ActivityKind::Swim).len(), 0);
        assert_eq!(store.activities_of_user(1).len(), 2);

        let runs_of_second: Vec<u64> = store
            .activities_matching(Some(ActivityKind::Run), Some(2))
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(runs_of_second, vec![12]);
        assert_eq!(store.activities_matching(None, None).len(), 3);
    }
}
