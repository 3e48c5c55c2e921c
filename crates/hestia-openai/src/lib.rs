// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible provider adapter.
//!
//! Implements [`ProviderAdapter`] over the chat completions API, translating
//! between the core message model and the wire format in both directions.

pub mod client;
pub mod sse;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::StreamExt;
use hestia_config::HestiaConfig;
use hestia_core::error::HestiaError;
use hestia_core::traits::{PluginAdapter, ProviderAdapter, ProviderStream};
use hestia_core::types::{
    AdapterType, HealthStatus, Message, ProviderRequest, ProviderResponse, ProviderStreamChunk,
    TokenUsage, ToolCall, ToolCallDelta,
};
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{ApiFunctionCall, ApiMessage, ApiToolCall, ApiUsage, ChatChunk, ChatRequest};

/// Chat completions provider for OpenAI and compatible servers.
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Build the provider from configuration. Fails when no API key is configured.
    pub fn new(config: &HestiaConfig) -> Result<Self, HestiaError> {
        let api_key = config.openai.api_key.as_deref().ok_or_else(|| {
            HestiaError::Config(
                "no OpenAI API key: set openai.api_key, HESTIA_OPENAI_API_KEY, or OPENAI_API_KEY"
                    .to_string(),
            )
        })?;

        let client = OpenAiClient::new(
            Some(api_key),
            &config.openai.api_base,
            Duration::from_secs(config.openai.timeout_secs),
            config.openai.max_retries,
        )?;

        info!(
            endpoint = client.endpoint(),
            model = %config.openai.model,
            "OpenAI provider initialized"
        );
        Ok(Self { client })
    }

    /// Wrap an already-built client.
    pub fn with_client(client: OpenAiClient) -> Self {
        Self { client }
    }
}

fn to_chat_request(request: ProviderRequest) -> ChatRequest {
    ChatRequest {
        model: request.model,
        messages: request.messages.iter().map(to_api_message).collect(),
        temperature: request.temperature,
        top_p: request.top_p,
        max_tokens: request.max_tokens,
        tools: request.tools.filter(|tools| !tools.is_empty()),
        stream: request.stream,
    }
}

fn to_api_message(message: &Message) -> ApiMessage {
    let tool_calls = (!message.tool_calls.is_empty()).then(|| {
        message
            .tool_calls
            .iter()
            .map(|call| ApiToolCall {
                id: call.id.clone(),
                type_: "function".to_string(),
                function: ApiFunctionCall {
                    name: call.name.clone(),
                    arguments: call.arguments.clone(),
                },
            })
            .collect()
    });

    let content = if tool_calls.is_some() && message.content.is_empty() {
        None
    } else {
        Some(message.content.clone())
    };

    ApiMessage {
        role: message.role.to_string(),
        content,
        tool_calls,
        tool_call_id: message.tool_call_id.clone(),
    }
}

fn from_api_message(message: ApiMessage) -> Message {
    let content = message.content.unwrap_or_default();
    let calls: Vec<ToolCall> = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|call| ToolCall {
            id: call.id,
            name: call.function.name,
            arguments: call.function.arguments,
        })
        .collect();

    if calls.is_empty() {
        Message::assistant(content)
    } else {
        Message::assistant_tool_calls(content, calls)
    }
}

fn to_usage(usage: ApiUsage) -> TokenUsage {
    TokenUsage {
        input_tokens: usage.prompt_tokens,
        output_tokens: usage.completion_tokens,
    }
}

fn to_stream_chunk(chunk: ChatChunk) -> ProviderStreamChunk {
    let usage = chunk.usage.map(to_usage);
    let Some(choice) = chunk.choices.into_iter().next() else {
        return ProviderStreamChunk {
            usage,
            ..ProviderStreamChunk::default()
        };
    };

    ProviderStreamChunk {
        text: choice.delta.content.filter(|t| !t.is_empty()),
        tool_calls: choice
            .delta
            .tool_calls
            .into_iter()
            .map(|fragment| {
                let (name, arguments) = fragment
                    .function
                    .map(|f| (f.name, f.arguments))
                    .unwrap_or_default();
                ToolCallDelta {
                    index: fragment.index,
                    id: fragment.id,
                    name,
                    arguments,
                }
            })
            .collect(),
        finish_reason: choice.finish_reason,
        usage,
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, HestiaError> {
        // No upstream call: a probe would spend tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HestiaError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, HestiaError> {
        let response = self.client.complete(&to_chat_request(request)).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| HestiaError::provider("provider returned no choices"))?;

        Ok(ProviderResponse {
            id: response.id,
            message: from_api_message(choice.message),
            model: response.model,
            finish_reason: choice.finish_reason,
            usage: response.usage.map(to_usage),
        })
    }

    async fn stream(&self, request: ProviderRequest) -> Result<ProviderStream, HestiaError> {
        let chunks = self.client.stream(&to_chat_request(request)).await?;
        Ok(Box::pin(chunks.map(|chunk| chunk.map(to_stream_chunk))))
    }
}
