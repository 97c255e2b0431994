//! HTTP client for the GoldAPI.io spot price API.

use std::time::Duration;

use url::Url;

use crate::{types::SpotPrice, Error};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://www.goldapi.io/api";

/// Request timeout applied when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the GoldAPI.io spot endpoint.
///
/// Holds a pooled `reqwest::Client`; cloning is cheap and clones share the
/// connection pool. Every request carries the `x-access-token` header.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_api_url: String,
}

impl Client {
    /// Creates a client pointing at the production API.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, timeout)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self::from_http_client(http, base_url, api_key))
    }

    /// Wraps an existing `reqwest::Client` so callers can share one pool.
    pub fn from_http_client(http: reqwest::Client, base_url: &str, api_key: String) -> Self {
        Self {
            http,
            api_key,
            base_api_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, symbol: &str, currency: &str) -> Result<Url, Error> {
        Url::parse(format!("{}/{}/{}", &self.base_api_url, symbol, currency).as_str()).map_err(
            |e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::RequestFailed
            },
        )
    }

    /// Fetches the current spot price of `symbol` (e.g. `XAU`) quoted in
    /// `currency` (e.g. `USD`).
    pub async fn get_spot_price(&self, symbol: &str, currency: &str) -> Result<SpotPrice, Error> {
        let url = self.get_url(symbol, currency)?;
        let resp = self
            .http
            .get(url)
            .header("x-access-token", &self.api_key)
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Failed to get {}/{}: {}", symbol, currency, e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::warn!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str::<SpotPrice>(&body)
            .map_err(|e| Error::Parse(format!("{} | body: {}", e, truncate_body(&body))))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 500;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
