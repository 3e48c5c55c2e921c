// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation state and per-run configuration.

use hestia_core::types::{Message, Role};
use hestia_router::{Category, SamplingOverrides};
use serde::{Deserialize, Serialize};

/// State carried through one run and persisted per thread.
///
/// `messages` only grows; new messages are appended, never replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    /// Category chosen by this turn's classification.
    pub issue_type: Option<Category>,
    /// Node label of the specialist that answered this turn.
    pub current_agent: Option<String>,
}

impl ConversationState {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn append(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.messages.extend(messages);
    }

    /// The most recent assistant reply that is not a tool request.
    pub fn last_reply(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant && m.tool_calls.is_empty())
    }
}

/// Identifies and parameterizes one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Locates the persisted state to continue.
    pub thread_id: String,
    /// Caller identity. Recorded in logs; never used for routing.
    pub user_id: String,
    pub sampling: SamplingOverrides,
    /// Whether the final state is saved. Off for threads nobody can continue.
    pub persist: bool,
}

impl RunConfig {
    pub fn new(thread_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            user_id: user_id.into(),
            sampling: SamplingOverrides::default(),
            persist: true,
        }
    }

    /// Run without saving the final state.
    pub fn transient(mut self) -> Self {
        self.persist = false;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingOverrides) -> Self {
        self.sampling = sampling;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_concatenates() {
        let mut state = ConversationState::new(vec![Message::user("one")]);
        state.append([Message::assistant("two"), Message::user("three")]);
        let contents: Vec<&str> = state.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["one", "two", "three"]);
    }

    #[test]
    fn last_reply_skips_tool_requests() {
        let mut state = ConversationState::new(vec![Message::user("q")]);
        state.append([
            Message::assistant("answer"),
            Message::assistant_tool_calls(
                "",
                vec![hestia_core::ToolCall {
                    id: "c".into(),
                    name: "t".into(),
                    arguments: "{}".into(),
                }],
            ),
            Message::tool_result("c", "result"),
        ]);
        assert_eq!(state.last_reply().unwrap().content, "answer");
    }

    #[test]
    fn run_config_persists_unless_transient() {
        assert!(RunConfig::new("t", "u").persist);
        assert!(!RunConfig::new("t", "u").transient().persist);
    }

    #[test]
    fn last_reply_none_without_assistant() {
        assert!(ConversationState::new(vec![Message::user("q")]).last_reply().is_none());
    }

    #[test]
    fn state_serializes_issue_type_lowercase() {
        let state = ConversationState {
            issue_type: Some(Category::Damp),
            ..ConversationState::default()
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["issue_type"], "damp");
    }
}
