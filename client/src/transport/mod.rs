//! HTTP transport seam between the gateway and the network.
//!
//! The gateway issues every call through the [`HttpTransport`] trait so the
//! retry and refresh logic can be exercised against an in-process fake. The
//! production implementation wraps a shared `reqwest::Client`.

use crate::errors::{ApiError, ApiResult};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub use reqwest::Method;

/// One outbound HTTP call, fully resolved.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    /// Bearer token to attach as `Authorization`, when a session exists.
    pub bearer: Option<String>,
    /// JSON request body, when present.
    pub body: Option<Value>,
}

/// A completed HTTP exchange: status code plus raw body text.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one HTTP exchange. Implementations report transport-level
/// failures (no response received) as [`ApiError::Network`]; any received
/// response, whatever its status, is returned as a [`TransportResponse`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: TransportRequest) -> ApiResult<TransportResponse>;
}

/// Production transport backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout_seconds: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> ApiResult<TransportResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .timeout(self.timeout)
            .header("Content-Type", "application/json");

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}
