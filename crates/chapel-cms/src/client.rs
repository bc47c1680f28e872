//! Strapi REST API client.
//!
//! Low-level HTTP access to a Strapi instance: builds request URLs from the
//! configured base, attaches the API token and turns HTTP failures into
//! [`CmsError`]s.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{CmsError, CmsResult};
use crate::source::{BoxFuture, ContentSource};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for a Strapi instance.
#[derive(Debug, Clone)]
pub struct StrapiConfig {
    /// Base URL, e.g. `http://localhost:1337`.
    pub base_url: String,
    /// Optional API token sent as a bearer credential.
    pub api_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl StrapiConfig {
    /// Creates a config for `base_url` with no token and the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builder method to set the API token; blank tokens are ignored.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.api_token = (!token.trim().is_empty()).then_some(token);
        self
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the Strapi content API.
#[derive(Debug, Clone)]
pub struct StrapiClient {
    http_client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl StrapiClient {
    /// Creates a client from `config`.
    ///
    /// Fails if the base URL is not an absolute http(s) URL or the HTTP
    /// client cannot be constructed.
    pub fn new(config: StrapiConfig) -> CmsResult<Self> {
        let parsed = Url::parse(config.base_url.trim()).map_err(|e| {
            CmsError::configuration(format!("invalid CMS base URL '{}'", config.base_url))
                .with_source(e)
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CmsError::configuration(format!(
                "CMS base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CmsError::configuration("failed to create HTTP client").with_source(e))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            api_token: config.api_token,
        })
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the full URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Performs `GET {base}{path}` and decodes the JSON body.
    pub async fn get_json(&self, path: &str) -> CmsResult<Value> {
        let url = self.endpoint(path);

        let mut request = self.http_client.get(&url);
        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            let err = if e.is_timeout() {
                CmsError::network("request timeout")
            } else if e.is_connect() {
                CmsError::network(format!("connection failed: {}", e))
            } else {
                CmsError::network(format!("request failed: {}", e))
            };
            warn!(path, error = %e, "CMS request failed");
            err.with_path(path)
        })?;

        let status = response.status();
        debug!(path, status = status.as_u16(), "CMS response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(path, status = status.as_u16(), "CMS returned an error status");
            return Err(CmsError::from_status(
                status.as_u16(),
                format!("API error ({}): {}", status, truncate(&body, 200)),
            )
            .with_path(path));
        }

        let body = response.text().await.map_err(|e| {
            CmsError::network(format!("failed to read response: {}", e)).with_path(path)
        })?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(path, "CMS response was not JSON");
            CmsError::invalid_response("failed to parse response as JSON")
                .with_path(path)
                .with_source(e)
        })
    }
}

impl ContentSource for StrapiClient {
    fn name(&self) -> &str {
        "strapi"
    }

    fn fetch_json(&self, path: &str) -> BoxFuture<'_, CmsResult<Value>> {
        let path = path.to_string();
        Box::pin(async move { self.get_json(&path).await })
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
