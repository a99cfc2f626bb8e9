//! HTTP client for the AMap web-service REST API.
//!
//! Wraps `reqwest` with the AMap key, base URL handling, and the `"status"`
//! envelope check shared by every endpoint. Endpoint methods live in
//! `district.rs` and `geocode.rs`.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::AmapError;

const DEFAULT_BASE_URL: &str = "https://restapi.amap.com/";

/// Client for the AMap web-service API.
///
/// Use [`AmapClient::new`] for production or [`AmapClient::with_base_url`] to
/// point at a mock server in tests.
pub struct AmapClient {
    client: Client,
    key: String,
    base_url: Url,
}

impl AmapClient {
    /// Creates a new client pointed at the production AMap API.
    ///
    /// # Errors
    ///
    /// Returns [`AmapError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(key: &str, timeout_secs: u64) -> Result<Self, AmapError> {
        Self::with_base_url(key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AmapError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AmapError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(key: &str, timeout_secs: u64, base_url: &str) -> Result<Self, AmapError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("estate/0.1 (listing-admin)")
            .build()?;

        // Exactly one trailing slash so `join` appends endpoint paths instead
        // of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| AmapError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            key: key.to_owned(),
            base_url,
        })
    }

    /// Builds an endpoint URL with the key first and `extra` percent-encoded after it.
    pub(crate) fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}{}", self.base_url.path(), path));
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AmapError::Http`] on network failure or a non-2xx status.
    /// Returns [`AmapError::Deserialize`] if the body is not valid JSON.
    pub(crate) async fn request_json(&self, url: &Url) -> Result<serde_json::Value, AmapError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| AmapError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }

    /// AMap signals success with `"status": "1"`; anything else is an error
    /// whose reason is in `"info"`.
    pub(crate) fn check_api_error(body: &serde_json::Value) -> Result<(), AmapError> {
        if body.get("status").and_then(serde_json::Value::as_str) == Some("1") {
            return Ok(());
        }
        let info = body
            .get("info")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        Err(AmapError::ApiError(info))
    }
}
