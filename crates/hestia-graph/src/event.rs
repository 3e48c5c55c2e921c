// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Execution events and the stream that carries them.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use hestia_core::HestiaError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::state::ConversationState;

/// Notifications emitted while a graph run executes, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    RunStarted { thread_id: String },
    NodeStarted { node: String },
    /// A fragment of model text produced inside `node`.
    Token { node: String, text: String },
    ToolStarted { node: String, tool: String },
    ToolFinished { node: String, tool: String, is_error: bool },
    NodeFinished { node: String },
    /// The run reached `end`; carries the state that was persisted.
    RunFinished { state: ConversationState },
}

/// Events from a run executing on a background task.
///
/// Dropping the stream aborts the task, so an abandoned run never reaches
/// `end` and commits nothing.
pub struct EventStream {
    rx: mpsc::Receiver<Result<GraphEvent, HestiaError>>,
    task: JoinHandle<()>,
}

impl EventStream {
    pub(crate) fn new(
        rx: mpsc::Receiver<Result<GraphEvent, HestiaError>>,
        task: JoinHandle<()>,
    ) -> Self {
        Self { rx, task }
    }
}

impl Stream for EventStream {
    type Item = Result<GraphEvent, HestiaError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for EventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("finished", &self.task.is_finished())
            .finish()
    }
}
