// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation between OpenAI-shaped requests and graph runs.

use std::str::FromStr;

use hestia_core::types::Role;
use hestia_core::Message;
use hestia_graph::{ConversationState, Graph, RunConfig};

use crate::error::ApiError;
use crate::types::{
    ChatCompletionChoice, ChatCompletionRequest, ChatCompletionResponse, ChatCompletionUsage,
    ChatMessage,
};

const EMPTY_REPLY: &str = "No response generated";

/// Fresh `chatcmpl-` completion id.
pub fn completion_id() -> String {
    format!("chatcmpl-{}", uuid::Uuid::new_v4())
}

/// Caller-supplied thread id, or a new `thread-` id.
pub fn resolve_thread_id(requested: Option<&str>) -> String {
    match requested {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => format!("thread-{}", uuid::Uuid::new_v4()),
    }
}

/// Converts wire messages, dropping roles a client may not send.
pub fn to_internal_messages(messages: &[ChatMessage]) -> Vec<Message> {
    messages
        .iter()
        .filter_map(|m| match Role::from_str(&m.role) {
            Ok(Role::System) => Some(Message::system(m.content.clone())),
            Ok(Role::User) => Some(Message::user(m.content.clone())),
            Ok(Role::Assistant) => Some(Message::assistant(m.content.clone())),
            Ok(Role::Tool) | Err(_) => {
                tracing::debug!(role = %m.role, "dropping message with unsupported role");
                None
            }
        })
        .collect()
}

/// Builds the run configuration for one request.
///
/// A minted thread id is never returned to the caller, so such runs are
/// transient and leave nothing in the thread store.
pub fn run_config(
    request: &ChatCompletionRequest,
    user_id: &str,
) -> Result<RunConfig, ApiError> {
    let sampling = request.sampling().map_err(ApiError::Validation)?;
    let thread_id = resolve_thread_id(request.thread_id.as_deref());
    let config = RunConfig::new(thread_id.clone(), user_id).with_sampling(sampling);
    if request.thread_id.as_deref() == Some(thread_id.as_str()) {
        Ok(config)
    } else {
        Ok(config.transient())
    }
}

/// Reply text of a finished run.
pub fn reply_text(state: &ConversationState) -> String {
    state
        .last_reply()
        .map(|m| m.content.clone())
        .unwrap_or_else(|| EMPTY_REPLY.to_string())
}

/// Runs the graph to completion and formats a single response.
pub async fn complete(
    graph: &dyn Graph,
    request: &ChatCompletionRequest,
    config: RunConfig,
) -> Result<ChatCompletionResponse, ApiError> {
    let thread_id = config.thread_id.clone();
    let state = graph
        .invoke(to_internal_messages(&request.messages), config)
        .await
        .map_err(|e| {
            tracing::error!(graph_id = graph.id(), thread_id = %thread_id, error = %e, "graph run failed");
            ApiError::from(e)
        })?;

    let reply = reply_text(&state);
    let usage = ChatCompletionUsage::estimate(&request.messages, &reply);

    Ok(ChatCompletionResponse {
        id: completion_id(),
        object: "chat.completion".to_string(),
        created: chrono::Utc::now().timestamp(),
        model: request.model.clone(),
        choices: vec![ChatCompletionChoice {
            index: 0,
            message: ChatMessage::assistant(reply),
            finish_reason: "stop".to_string(),
        }],
        usage,
    })
}
