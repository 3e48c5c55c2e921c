// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end HTTP tests.
//!
//! `TestHarness` wires a [`MockProvider`] into the built-in tools, a routing
//! graph with an in-memory thread store, and the gateway router. Requests are
//! driven through the router with `tower::ServiceExt::oneshot`; no socket is
//! bound.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use hestia_config::HestiaConfig;
use hestia_core::{HestiaError, ProviderAdapter};
use hestia_gateway::{GatewayState, auth_from_token, build_router};
use hestia_graph::{GraphRegistry, InMemoryThreadStore, RoutingGraph};
use hestia_skill::ToolRegistry;
use hestia_skill::builtin::register_builtins;
use tower::ServiceExt;

use crate::mock_provider::{MockProvider, MockReply};

/// Builder for [`TestHarness`].
pub struct TestHarnessBuilder {
    provider: MockProvider,
    config: HestiaConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            provider: MockProvider::new(),
            config: HestiaConfig::default(),
        }
    }

    /// Queue scripted replies, consumed one per model call.
    pub fn with_replies(self, replies: impl IntoIterator<Item = MockReply>) -> Self {
        for reply in replies {
            self.provider.push(reply);
        }
        self
    }

    /// Replace the provider, e.g. with a responder-driven one.
    pub fn with_provider(mut self, provider: MockProvider) -> Self {
        self.provider = provider;
        self
    }

    /// Require `Authorization: Bearer <token>` on `/v1` routes.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config.server.bearer_token = Some(token.into());
        self
    }

    pub fn with_config(mut self, config: HestiaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> TestHarness {
        let provider = Arc::new(self.provider);
        let dyn_provider: Arc<dyn ProviderAdapter> = provider.clone();

        let mut tools = ToolRegistry::new();
        register_builtins(&mut tools);

        let store = Arc::new(InMemoryThreadStore::new());
        let graph = RoutingGraph::from_config(&self.config, dyn_provider, Arc::new(tools), store.clone());

        let mut registry = GraphRegistry::new();
        registry.register(Arc::new(graph));
        let registry = Arc::new(registry);

        let state = GatewayState {
            registry: registry.clone(),
            auth: auth_from_token(self.config.server.bearer_token.as_deref()),
            service_name: self.config.service.name.clone(),
        };

        TestHarness {
            provider,
            store,
            registry,
            router: build_router(state),
            config: self.config,
        }
    }
}

/// Status, headers and raw body of one response.
#[derive(Debug)]
pub struct HttpReply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpReply {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }

    /// Payloads of the `data:` lines of an SSE body, in order.
    pub fn sse_data(&self) -> Vec<String> {
        self.body
            .lines()
            .filter_map(|line| line.strip_prefix("data:"))
            .map(|data| data.trim_start().to_string())
            .collect()
    }
}

/// A gateway router backed by a mock provider.
pub struct TestHarness {
    pub provider: Arc<MockProvider>,
    pub store: Arc<InMemoryThreadStore>,
    pub registry: Arc<GraphRegistry>,
    pub router: Router,
    pub config: HestiaConfig,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Id the routing graph is registered under.
    pub fn graph_id(&self) -> &str {
        &self.config.graph.id
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<HttpReply, HestiaError> {
        let mut request = Request::get(path);
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {token}"));
        }
        let request = request
            .body(Body::empty())
            .map_err(|e| HestiaError::Internal(format!("invalid test request: {e}")))?;
        self.send(request).await
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        token: Option<&str>,
    ) -> Result<HttpReply, HestiaError> {
        let mut request = Request::post(path).header("content-type", "application/json");
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {token}"));
        }
        let request = request
            .body(Body::from(body.to_string()))
            .map_err(|e| HestiaError::Internal(format!("invalid test request: {e}")))?;
        self.send(request).await
    }

    /// `POST /v1/chat/completions` with user messages against the routing graph.
    pub async fn chat(
        &self,
        user_messages: &[&str],
        thread_id: Option<&str>,
        stream: bool,
    ) -> Result<HttpReply, HestiaError> {
        let messages: Vec<serde_json::Value> = user_messages
            .iter()
            .map(|content| serde_json::json!({"role": "user", "content": content}))
            .collect();
        let mut body = serde_json::json!({
            "model": self.graph_id(),
            "messages": messages,
            "stream": stream,
        });
        if let Some(thread_id) = thread_id {
            body["thread_id"] = serde_json::Value::String(thread_id.to_string());
        }
        self.post_json("/v1/chat/completions", &body, None).await
    }

    async fn send(&self, request: Request<Body>) -> Result<HttpReply, HestiaError> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| HestiaError::Internal(format!("router error: {e}")))?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| HestiaError::Internal(format!("failed to read body: {e}")))?;
        Ok(HttpReply {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn harness_serves_models() {
        let harness = TestHarness::builder().build();
        let reply = harness.get("/v1/models", None).await.unwrap();
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.json()["data"][0]["id"], "uk_housing");
    }

    #[tokio::test]
    async fn harness_chat_uses_scripted_replies() {
        let harness = TestHarness::builder()
            .with_replies([MockReply::text("heating"), MockReply::text("Bleed the radiators.")])
            .build();
        let reply = harness.chat(&["My radiators are cold"], None, false).await.unwrap();
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(
            reply.json()["choices"][0]["message"]["content"],
            "Bleed the radiators."
        );
        assert_eq!(harness.provider.request_count(), 2);
    }

    #[test]
    fn sse_data_strips_prefix() {
        let reply = HttpReply {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: "data: {\"a\":1}\n\ndata: [DONE]\n\n".to_string(),
        };
        assert_eq!(reply.sse_data(), vec!["{\"a\":1}", "[DONE]"]);
    }
}
