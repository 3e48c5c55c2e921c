// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for an OpenAI-compatible chat completions endpoint.
//!
//! Owns authentication, the request timeout, and retry of transient upstream
//! statuses. Callers above this layer never retry.

use std::pin::Pin;
use std::time::Duration;

use futures::Stream;
use hestia_core::HestiaError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::sse;
use crate::types::{ApiErrorResponse, ChatChunk, ChatRequest, ChatResponse};

const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Boxed stream of parsed SSE chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<ChatChunk, HestiaError>> + Send>>;

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    max_retries: u32,
}

impl OpenAiClient {
    /// Build a client for `{api_base}/chat/completions`.
    ///
    /// `api_key` is sent as a bearer token when present.
    pub fn new(
        api_key: Option<&str>,
        api_base: &str,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, HestiaError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| HestiaError::Config(format!("invalid API key header value: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| HestiaError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            max_retries,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Non-streaming completion.
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, HestiaError> {
        let mut req = request.clone();
        req.stream = false;

        let response = self.send(&req).await?;
        let body = response.text().await.map_err(|e| HestiaError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| HestiaError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Streaming completion; chunks arrive as the upstream produces them.
    pub async fn stream(&self, request: &ChatRequest) -> Result<ChunkStream, HestiaError> {
        let mut req = request.clone();
        req.stream = true;

        let response = self.send(&req).await?;
        Ok(sse::parse_sse_stream(response))
    }

    /// POST with retry on transient statuses, `max_retries` extra attempts.
    async fn send(&self, request: &ChatRequest) -> Result<reqwest::Response, HestiaError> {
        let mut attempt = 0;
        loop {
            let response = self
                .client
                .post(&self.endpoint)
                .json(request)
                .send()
                .await
                .map_err(|e| HestiaError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, stream = request.stream, "provider response received");

            if status.is_success() {
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, attempt, "transient provider error, retrying");
                attempt += 1;
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }

            return Err(HestiaError::provider(describe_error(status, &body)));
        }
    }
}

fn describe_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => match api_err.error.type_ {
            Some(kind) => format!("OpenAI API error ({kind}): {}", api_err.error.message),
            None => format!("OpenAI API error ({status}): {}", api_err.error.message),
        },
        Err(_) => format!("API returned {status}: {body}"),
    }
}

/// Statuses worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503)
}
