// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted LLM provider for deterministic tests.
//!
//! Replies come from a FIFO queue, or from a responder closure when one is
//! installed. An empty queue answers `"mock response"`. Every request is
//! recorded for later inspection. Streamed text is split word by word.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures::stream;
use hestia_core::traits::{PluginAdapter, ProviderAdapter, ProviderStream};
use hestia_core::types::{
    AdapterType, HealthStatus, Message, ProviderRequest, ProviderResponse, ProviderStreamChunk,
    TokenUsage, ToolCall, ToolCallDelta,
};
use hestia_core::HestiaError;

const DEFAULT_REPLY: &str = "mock response";

/// One scripted provider reply.
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Plain assistant text.
    Text(String),
    /// An assistant message requesting these tool calls.
    ToolCalls(Vec<ToolCall>),
    /// The call itself fails.
    Failure(String),
    /// Streams the text, then fails mid-stream. Fails outright when not streaming.
    StreamFailure { partial: String, message: String },
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// A single tool call with a generated id.
    pub fn tool_call(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        let name = name.into();
        Self::ToolCalls(vec![ToolCall {
            id: format!("call_{name}"),
            name,
            arguments: arguments.into(),
        }])
    }
}

type Responder = Box<dyn Fn(&ProviderRequest) -> MockReply + Send + Sync>;

/// A provider that plays back scripted replies.
pub struct MockProvider {
    replies: Mutex<VecDeque<MockReply>>,
    responder: Option<Responder>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            responder: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Pre-loaded with text replies, in order.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        for text in responses {
            provider.push_text(text);
        }
        provider
    }

    /// Compute every reply from the request. Takes precedence over the queue.
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&ProviderRequest) -> MockReply + Send + Sync + 'static,
    {
        Self {
            responder: Some(Box::new(responder)),
            ..Self::new()
        }
    }

    pub fn push(&self, reply: MockReply) {
        lock(&self.replies).push_back(reply);
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.push(MockReply::text(text));
    }

    pub fn push_tool_call(&self, name: impl Into<String>, arguments: impl Into<String>) {
        self.push(MockReply::tool_call(name, arguments));
    }

    pub fn push_failure(&self, message: impl Into<String>) {
        self.push(MockReply::Failure(message.into()));
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ProviderRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn next_reply(&self, request: &ProviderRequest) -> MockReply {
        lock(&self.requests).push(request.clone());
        match &self.responder {
            Some(responder) => responder(request),
            None => lock(&self.replies)
                .pop_front()
                .unwrap_or_else(|| MockReply::text(DEFAULT_REPLY)),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn mock_usage() -> TokenUsage {
    TokenUsage {
        input_tokens: 10,
        output_tokens: 20,
    }
}

/// Split text into word-sized pieces that concatenate back to the original.
pub fn word_chunks(text: &str) -> Vec<String> {
    text.split_inclusive(' ').map(str::to_string).collect()
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, HestiaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HestiaError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, HestiaError> {
        let (message, finish_reason) = match self.next_reply(&request) {
            MockReply::Text(text) => (Message::assistant(text), "stop"),
            MockReply::ToolCalls(calls) => (Message::assistant_tool_calls("", calls), "tool_calls"),
            MockReply::Failure(message) | MockReply::StreamFailure { message, .. } => {
                return Err(HestiaError::provider(message));
            }
        };

        Ok(ProviderResponse {
            id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
            message,
            model: request.model,
            finish_reason: Some(finish_reason.to_string()),
            usage: Some(mock_usage()),
        })
    }

    async fn stream(&self, request: ProviderRequest) -> Result<ProviderStream, HestiaError> {
        let mut chunks: Vec<Result<ProviderStreamChunk, HestiaError>> = Vec::new();

        match self.next_reply(&request) {
            MockReply::Text(text) => {
                chunks.extend(word_chunks(&text).into_iter().map(|w| Ok(ProviderStreamChunk::text(w))));
                chunks.push(Ok(ProviderStreamChunk {
                    finish_reason: Some("stop".into()),
                    usage: Some(mock_usage()),
                    ..ProviderStreamChunk::default()
                }));
            }
            MockReply::ToolCalls(calls) => {
                for (index, call) in calls.into_iter().enumerate() {
                    chunks.push(Ok(ProviderStreamChunk {
                        tool_calls: vec![ToolCallDelta {
                            index: index as u32,
                            id: Some(call.id),
                            name: Some(call.name),
                            arguments: Some(call.arguments),
                        }],
                        ..ProviderStreamChunk::default()
                    }));
                }
                chunks.push(Ok(ProviderStreamChunk {
                    finish_reason: Some("tool_calls".into()),
                    ..ProviderStreamChunk::default()
                }));
            }
            MockReply::Failure(message) => return Err(HestiaError::provider(message)),
            MockReply::StreamFailure { partial, message } => {
                chunks.extend(word_chunks(&partial).into_iter().map(|w| Ok(ProviderStreamChunk::text(w))));
                chunks.push(Err(HestiaError::provider(message)));
            }
        }

        Ok(Box::pin(stream::iter(chunks)))
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;

    fn request() -> ProviderRequest {
        ProviderRequest::new("test-model", vec![Message::user("hi")])
    }

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        let resp = provider.complete(request()).await.unwrap();
        assert_eq!(resp.message.content, "mock response");
    }

    #[tokio::test]
    async fn queued_responses_returned_in_order() {
        let provider = MockProvider::with_responses(["first", "second"]);
        assert_eq!(provider.complete(request()).await.unwrap().message.content, "first");
        assert_eq!(provider.complete(request()).await.unwrap().message.content, "second");
        assert_eq!(provider.request_count(), 2);
    }

    #[tokio::test]
    async fn stream_splits_words_and_finishes() {
        let provider = MockProvider::with_responses(["Bleed the radiators"]);
        let chunks: Vec<ProviderStreamChunk> = provider
            .stream(request())
            .await
            .unwrap()
            .map(|c| c.unwrap())
            .collect()
            .await;

        let texts: Vec<&str> = chunks.iter().filter_map(|c| c.text.as_deref()).collect();
        assert_eq!(texts, ["Bleed ", "the ", "radiators"]);
        assert_eq!(chunks.last().unwrap().finish_reason.as_deref(), Some("stop"));
    }

    #[tokio::test]
    async fn tool_call_reply_streams_deltas() {
        let provider = MockProvider::new();
        provider.push_tool_call("get_boiler_info", r#"{"boiler_brand":"Baxi"}"#);
        let chunks: Vec<ProviderStreamChunk> = provider
            .stream(request())
            .await
            .unwrap()
            .map(|c| c.unwrap())
            .collect()
            .await;
        assert_eq!(chunks[0].tool_calls[0].name.as_deref(), Some("get_boiler_info"));
        assert_eq!(chunks[1].finish_reason.as_deref(), Some("tool_calls"));
    }

    #[tokio::test]
    async fn failure_is_provider_error() {
        let provider = MockProvider::new();
        provider.push_failure("boom");
        assert!(provider.complete(request()).await.is_err());
    }

    #[tokio::test]
    async fn stream_failure_errors_after_partial_text() {
        let provider = MockProvider::new();
        provider.push(MockReply::StreamFailure {
            partial: "Partial answer".into(),
            message: "connection dropped".into(),
        });
        let items: Vec<Result<ProviderStreamChunk, HestiaError>> =
            provider.stream(request()).await.unwrap().collect().await;
        assert_eq!(items.len(), 3);
        assert!(items[2].is_err());
    }

    #[tokio::test]
    async fn responder_sees_request() {
        let provider = MockProvider::with_responder(|req| {
            MockReply::text(format!("echo: {}", req.messages.last().map(|m| m.content.as_str()).unwrap_or("")))
        });
        let resp = provider.complete(request()).await.unwrap();
        assert_eq!(resp.message.content, "echo: hi");
    }
}
