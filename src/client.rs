//! Discogs API client.
//!
//! Thin HTTP layer over the three upstream resources the gateway
//! needs: release by id, master by id, and database search. Every
//! call acquires a [`RateLimiter`] slot immediately before the wire —
//! including the retry — so local throttling stays accurate even when
//! upstream pushes back.
//!
//! A 429 despite local throttling is retried exactly once after the
//! `Retry-After` delay (default 60 s when the header is absent or
//! unparseable). See: <https://www.discogs.com/developers>

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::limiter::RateLimiter;
use crate::telemetry;
use crate::types::{ReleasePayload, SearchPayload};
use crate::{GatewayError, Result};

/// Default base URL for the Discogs API
pub const DEFAULT_BASE_URL: &str = "https://api.discogs.com";

const USER_AGENT: &str = concat!("platter/", env!("CARGO_PKG_VERSION"));

/// Fallback delay when a 429 carries no usable Retry-After header.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Search resource kinds the gateway queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Release,
    Master,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Release => "release",
            SearchKind::Master => "master",
        }
    }
}

/// One upstream database search.
///
/// Results are requested sorted by community "have" count descending,
/// so arrival order doubles as a popularity order downstream.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Free-text query, mutually exclusive with `barcode` in practice.
    pub query: Option<String>,
    /// Digits-only barcode.
    pub barcode: Option<String>,
    pub kind: SearchKind,
    pub per_page: u32,
}

/// Client for the Discogs REST API.
#[derive(Clone)]
pub struct DiscogsClient {
    token: String,
    http: Client,
    base_url: String,
    limiter: Arc<RateLimiter>,
}

impl DiscogsClient {
    /// Create a new client against the production API.
    pub fn new(token: impl Into<String>, limiter: Arc<RateLimiter>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL, limiter, Duration::from_secs(60))
    }

    /// Create a client with a custom base URL (for testing with
    /// wiremock) and request timeout.
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
        limiter: Arc<RateLimiter>,
        timeout: Duration,
    ) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            token: token.into(),
            http,
            base_url: base_url.into(),
            limiter,
        }
    }

    /// Fetch a release by id.
    pub async fn release(&self, id: u64) -> Result<ReleasePayload> {
        self.get_json(&format!("/releases/{id}"), &[], "release")
            .await
    }

    /// Fetch a master by id.
    pub async fn master(&self, id: u64) -> Result<ReleasePayload> {
        self.get_json(&format!("/masters/{id}"), &[], "master").await
    }

    /// Run a database search.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchPayload> {
        let mut params: Vec<(&str, String)> = Vec::with_capacity(6);
        if let Some(q) = &request.query {
            params.push(("q", q.clone()));
        }
        if let Some(barcode) = &request.barcode {
            params.push(("barcode", barcode.clone()));
        }
        params.push(("type", request.kind.as_str().to_owned()));
        params.push(("per_page", request.per_page.to_string()));
        params.push(("sort", "have".to_owned()));
        params.push(("sort_order", "desc".to_owned()));

        self.get_json("/database/search", &params, "search").await
    }

    /// GET a resource, retrying once on 429 with the advertised delay.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        operation: &'static str,
    ) -> Result<T> {
        let start = std::time::Instant::now();
        let result = self.get_json_inner(path, params, operation).await;
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "operation" => operation)
            .record(start.elapsed().as_secs_f64());
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "operation" => operation,
            "status" => if result.is_ok() { "ok" } else { "error" },
        )
        .increment(1);
        result
    }

    async fn get_json_inner<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        operation: &'static str,
    ) -> Result<T> {
        self.limiter.acquire().await;
        let mut response = self.send(path, params).await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let delay = retry_after(&response).unwrap_or(DEFAULT_RETRY_AFTER);
            metrics::counter!(telemetry::RETRIES_TOTAL, "operation" => operation).increment(1);
            warn!(
                path,
                delay_ms = delay.as_millis() as u64,
                "throttled upstream, retrying once"
            );
            tokio::time::sleep(delay).await;
            self.limiter.acquire().await;
            response = self.send(path, params).await?;
        }

        self.check_status(&response, path)?;
        response
            .json()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))
    }

    async fn send(&self, path: &str, params: &[(&str, String)]) -> Result<Response> {
        self.http
            .get(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Discogs token={}", self.token))
            .query(params)
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))
    }

    /// Check response status and map to appropriate error.
    fn check_status(&self, response: &Response, path: &str) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            401 => Err(GatewayError::AuthenticationFailed),
            404 => Err(GatewayError::NotFound(path.to_string())),
            429 => {
                // Second 429 in a row; the single retry is spent.
                Err(GatewayError::RateLimited {
                    retry_after: retry_after(response),
                })
            }
            code => Err(GatewayError::Api {
                status: code,
                message: format!("Discogs API error: {}", status),
            }),
        }
    }
}

/// Parse the `Retry-After` header (seconds form only).
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
