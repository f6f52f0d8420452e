//! Admin API HTTP Client
//!
//! Thin wrapper over `reqwest` that adds JSON content negotiation and an
//! optional bearer token to every request. Non-2xx responses are returned
//! as-is; classification is left to the caller.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};

use super::error::ApiError;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://212.127.78.111/api";

/// Source of the bearer token, consulted on every request
pub trait TokenProvider: Send + Sync {
    /// Current token, or `None` for an unauthenticated request
    fn token(&self) -> Option<String>;
}

impl<F> TokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        self()
    }
}

/// Provider that never yields a token
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// Configuration for the admin API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL every path is appended to (e.g. "http://localhost:8000/api")
    pub base_url: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Per-request options merged over the defaults
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    /// Extra headers; these win over the defaults on conflicting names
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn post(body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    /// Builder method: add or override a header
    /// Add a header; repeating a name keeps every value
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// Admin API client
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new client; trailing slashes on the base URL are dropped
    pub fn new(mut config: ApiClientConfig) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        Self {
            client: Client::new(),
            config,
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Default headers for a request, with the token resolved right now
    pub fn auth_headers(tokens: &dyn TokenProvider) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = tokens.token().filter(|t| !t.is_empty()) {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => {
                    tracing::warn!("Stored token is not a valid header value, sending request without it");
                }
            }
        }

        headers
    }

    /// Send a request with JSON headers and, when available, a bearer token
    ///
    /// Only transport failures are errors; any HTTP status is returned.
    pub async fn fetch_with_auth(
        &self,
        path: &str,
        tokens: &dyn TokenProvider,
        options: RequestOptions,
    ) -> Result<Response, ApiError> {
        let mut headers = Self::auth_headers(tokens);
        for name in options.headers.keys() {
            headers.remove(name);
            for value in options.headers.get_all(name) {
                headers.append(name.clone(), value.clone());
            }
        }

        let url = self.url(path);
        let mut request = self
            .client
            .request(options.method.clone(), &url)
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.body(body.to_string());
        }

        tracing::debug!(method = %options.method, url = %url, "Sending API request");

        let response = request.send().await.map_err(|e| {
            tracing::warn!(method = %options.method, url = %url, error = %e, "API request failed");
            ApiError::Transport(e)
        })?;

        tracing::debug!(url = %url, status = %response.status(), "API response received");
        Ok(response)
    }

    /// Send a request without a token
    pub async fn fetch(&self, path: &str, options: RequestOptions) -> Result<Response, ApiError> {
        self.fetch_with_auth(path, &NoToken, options).await
    }
}
