//! # Transport Adapter
//!
//! Sends one POST to the gateway and reports what happened, with no
//! interpretation of the response. Interpretation is the normalizer's job.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::ConfigError;

/// Everything needed to issue the checkout POST
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    /// Absolute endpoint URL (base URL + checkout path)
    pub url: &'a str,
    /// Extra headers, e.g. authentication
    pub headers: Vec<(&'static str, String)>,
}

/// A response that arrived, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why no response was obtained
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    /// Connection refused, DNS failure, TLS handshake failure
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    /// Response started but the body could not be read
    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("network error: {0}")]
    Network(String),

    /// The request could not be constructed (bad URL, bad header value)
    #[error("invalid request: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportFailure {
    fn from(e: reqwest::Error) -> Self {
        let message = e.to_string();
        if e.is_builder() {
            TransportFailure::Request(message)
        } else if e.is_timeout() {
            TransportFailure::Timeout(message)
        } else if e.is_connect() {
            TransportFailure::Connect(message)
        } else if e.is_body() || e.is_decode() {
            TransportFailure::Body(message)
        } else {
            TransportFailure::Network(message)
        }
    }
}

/// Outcome of a single transport attempt
pub type TransportOutcome = Result<TransportResponse, TransportFailure>;

/// Outbound HTTP seam. Swap in a fake to test without a network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `ctx.url`. Exactly one attempt, no retries.
    async fn post(&self, ctx: RequestContext<'_>, body: Vec<u8>) -> TransportOutcome;

    /// Returns the transport name for logging
    fn name(&self) -> &'static str;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, ctx: RequestContext<'_>, body: Vec<u8>) -> TransportOutcome {
        let mut request = self
            .client
            .post(ctx.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json");

        for (name, value) in &ctx.headers {
            request = request.header(*name, value);
        }

        let response = request.body(body).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(TransportResponse::new(status, body.to_vec()))
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(201, "").is_success());
        assert!(!TransportResponse::new(302, "").is_success());
        assert!(!TransportResponse::new(400, "").is_success());
    }

    #[tokio::test]
    async fn test_invalid_url_is_request_failure() {
        let transport = HttpTransport::new(Duration::from_secs(1)).unwrap();
        let ctx = RequestContext {
            url: "not a url",
            headers: vec![],
        };

        let outcome = transport.post(ctx, b"{}".to_vec()).await;
        assert!(matches!(outcome, Err(TransportFailure::Request(_))));
    }
}
