// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona-bound specialist agent.
//!
//! All four specialists share this one implementation and differ only in their
//! [`Persona`]. A turn streams the model reply with the tool registry bound; if
//! the model asks for tools they are executed and the results fed back, until
//! the model answers in plain text or the round limit forces a tool-less call.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::StreamExt;
use hestia_config::HestiaConfig;
use hestia_core::types::{Message, ProviderRequest, ToolCall, ToolCallDelta};
use hestia_core::{HestiaError, ProviderAdapter};
use hestia_skill::ToolRegistry;
use tracing::{debug, info};

use crate::observer::TurnObserver;
use crate::persona::Persona;

/// Per-run sampling overrides from the caller. `None` keeps the configured value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SamplingOverrides {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Model and sampling settings shared by every specialist.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Tool round-trips allowed before the final tool-less call.
    pub max_tool_rounds: u32,
}

impl AgentSettings {
    pub fn from_config(config: &HestiaConfig) -> Self {
        Self {
            model: config.openai.model.clone(),
            temperature: config.generation.temperature,
            max_tokens: config.generation.max_tokens,
            max_tool_rounds: config.generation.max_tool_rounds,
        }
    }
}

/// Produces one assistant reply per turn in a fixed persona.
pub struct SpecialistAgent {
    persona: Persona,
    provider: Arc<dyn ProviderAdapter>,
    tools: Arc<ToolRegistry>,
    settings: AgentSettings,
}

impl SpecialistAgent {
    pub fn new(
        persona: Persona,
        provider: Arc<dyn ProviderAdapter>,
        tools: Arc<ToolRegistry>,
        settings: AgentSettings,
    ) -> Self {
        Self {
            persona,
            provider,
            tools,
            settings,
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Node label, e.g. `heating_agent`.
    pub fn name(&self) -> &str {
        &self.persona.agent_name
    }

    /// Run one turn over `history`.
    ///
    /// Returns every message the turn produced, in order: assistant tool-call
    /// messages, their tool results, and the final assistant reply (always last).
    pub async fn respond(
        &self,
        history: &[Message],
        overrides: SamplingOverrides,
        observer: &dyn TurnObserver,
    ) -> Result<Vec<Message>, HestiaError> {
        let mut produced: Vec<Message> = Vec::new();
        let mut round = 0;

        loop {
            let bind_tools = round < self.settings.max_tool_rounds && !self.tools.is_empty();
            let request = self.build_request(history, &produced, overrides, bind_tools);
            let reply = self.stream_reply(request, observer).await?;

            if !(bind_tools && reply.requests_tools()) {
                debug!(agent = %self.name(), rounds = round, "specialist turn complete");
                produced.push(Message::assistant(reply.content));
                return Ok(produced);
            }

            let calls = reply.tool_calls.clone();
            produced.push(reply);
            for call in calls {
                info!(agent = %self.name(), tool = %call.name, "executing tool call");
                observer.on_tool_start(&call.name).await;
                let output = self.tools.execute(&call.name, &call.arguments).await;
                observer.on_tool_end(&call.name, output.is_error).await;
                produced.push(Message::tool_result(call.id, output.content));
            }
            round += 1;
        }
    }

    fn build_request(
        &self,
        history: &[Message],
        produced: &[Message],
        overrides: SamplingOverrides,
        bind_tools: bool,
    ) -> ProviderRequest {
        let mut messages = Vec::with_capacity(history.len() + produced.len() + 1);
        messages.push(Message::system(self.persona.system_prompt.clone()));
        messages.extend_from_slice(history);
        messages.extend_from_slice(produced);

        let mut request = ProviderRequest::new(self.settings.model.clone(), messages);
        request.temperature = Some(overrides.temperature.unwrap_or(self.settings.temperature));
        request.top_p = overrides.top_p;
        request.max_tokens = Some(overrides.max_tokens.unwrap_or(self.settings.max_tokens));
        request.tools = bind_tools.then(|| self.tools.tool_definitions());
        request.stream = true;
        request
    }

    /// Stream one model call, forwarding text to `observer` and assembling tool calls.
    async fn stream_reply(
        &self,
        request: ProviderRequest,
        observer: &dyn TurnObserver,
    ) -> Result<Message, HestiaError> {
        let mut stream = self.provider.stream(request).await?;
        let mut content = String::new();
        let mut calls = ToolCallAssembler::default();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if let Some(text) = chunk.text.filter(|t| !t.is_empty()) {
                observer.on_token(&text).await;
                content.push_str(&text);
            }
            for delta in chunk.tool_calls {
                calls.push(delta);
            }
        }

        let calls = calls.finish();
        Ok(if calls.is_empty() {
            Message::assistant(content)
        } else {
            Message::assistant_tool_calls(content, calls)
        })
    }
}

impl std::fmt::Debug for SpecialistAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecialistAgent")
            .field("persona", &self.persona.agent_name)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Folds streamed tool-call fragments into whole calls, keyed by index.
#[derive(Debug, Default)]
struct ToolCallAssembler {
    partial: BTreeMap<u32, ToolCall>,
}

impl ToolCallAssembler {
    fn push(&mut self, delta: ToolCallDelta) {
        let entry = self.partial.entry(delta.index).or_insert_with(|| ToolCall {
            id: String::new(),
            name: String::new(),
            arguments: String::new(),
        });
        if let Some(id) = delta.id {
            entry.id = id;
        }
        if let Some(name) = delta.name {
            entry.name.push_str(&name);
        }
        if let Some(arguments) = delta.arguments {
            entry.arguments.push_str(&arguments);
        }
    }

    /// Calls in index order. Nameless fragments are dropped; missing ids are minted.
    fn finish(self) -> Vec<ToolCall> {
        self.partial
            .into_iter()
            .filter(|(_, call)| !call.name.is_empty())
            .map(|(index, mut call)| {
                if call.id.is_empty() {
                    call.id = format!("call_{index}");
                }
                call
            })
            .collect()
    }
}
