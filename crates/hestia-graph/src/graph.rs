// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The runnable-graph abstraction the HTTP layer talks to.

use async_trait::async_trait;
use hestia_core::{HestiaError, Message};

use crate::event::EventStream;
use crate::state::{ConversationState, RunConfig};

/// A graph that runs one conversation turn per invocation.
#[async_trait]
pub trait Graph: Send + Sync {
    /// Registry id, exposed to clients as a model id.
    fn id(&self) -> &str;

    /// Run to completion and return the final state.
    async fn invoke(
        &self,
        input: Vec<Message>,
        config: RunConfig,
    ) -> Result<ConversationState, HestiaError>;

    /// Run in the background, yielding events as they occur. Must be called
    /// inside a tokio runtime.
    fn stream_events(&self, input: Vec<Message>, config: RunConfig) -> EventStream;
}
