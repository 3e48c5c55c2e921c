// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Streaming chat completions over SSE.
//!
//! Graph token events become `chat.completion.chunk` frames in arrival order.
//! A finished run adds one `finish_reason: "stop"` chunk and the literal
//! `[DONE]` sentinel. A failed run adds a single `{"error": ...}` frame and
//! ends the stream without the stop chunk or sentinel.
//!
//! The graph's [`EventStream`] lives inside the response body, so a client
//! disconnect drops it and cancels the run.

use std::collections::VecDeque;
use std::convert::Infallible;

use axum::http::header::{HeaderName, HeaderValue};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use futures::stream::{self, Stream, StreamExt};
use hestia_graph::{EventStream, GraphEvent};
use serde::Serialize;

use crate::types::{ChatCompletionChunk, ChatCompletionStreamChoice, ChatDelta};

const DONE_SENTINEL: &str = "[DONE]";

/// Envelope shared by every chunk of one completion.
#[derive(Debug, Clone)]
pub struct ChunkFactory {
    id: String,
    model: String,
    created: i64,
}

impl ChunkFactory {
    pub fn new(id: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            created: chrono::Utc::now().timestamp(),
        }
    }

    pub fn content(&self, text: impl Into<String>) -> ChatCompletionChunk {
        self.chunk(text.into(), None)
    }

    pub fn stop(&self) -> ChatCompletionChunk {
        self.chunk(String::new(), Some("stop".to_string()))
    }

    fn chunk(&self, content: String, finish_reason: Option<String>) -> ChatCompletionChunk {
        ChatCompletionChunk {
            id: self.id.clone(),
            object: "chat.completion.chunk".to_string(),
            created: self.created,
            model: self.model.clone(),
            choices: vec![ChatCompletionStreamChoice {
                index: 0,
                delta: ChatDelta {
                    role: "assistant".to_string(),
                    content,
                },
                finish_reason,
            }],
        }
    }
}

#[derive(Serialize)]
struct StreamErrorBody {
    message: String,
}

#[derive(Serialize)]
struct StreamError {
    error: StreamErrorBody,
}

fn json_event<T: Serialize>(value: &T) -> Event {
    Event::default().json_data(value).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to encode SSE frame");
        Event::default().data(r#"{"error":{"message":"failed to encode chunk"}}"#)
    })
}

fn error_event(message: impl Into<String>) -> Event {
    json_event(&StreamError {
        error: StreamErrorBody {
            message: message.into(),
        },
    })
}

struct ChunkState {
    events: EventStream,
    chunks: ChunkFactory,
    pending: VecDeque<Event>,
    done: bool,
}

/// Maps graph events to SSE frames.
pub fn completion_frames(
    events: EventStream,
    chunks: ChunkFactory,
) -> impl Stream<Item = Result<Event, Infallible>> + Send {
    let state = ChunkState {
        events,
        chunks,
        pending: VecDeque::new(),
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(frame) = state.pending.pop_front() {
                return Some((Ok(frame), state));
            }
            if state.done {
                return None;
            }
            match state.events.next().await {
                Some(Ok(GraphEvent::Token { text, .. })) => {
                    if !text.is_empty() {
                        let chunk = state.chunks.content(text);
                        state.pending.push_back(json_event(&chunk));
                    }
                }
                Some(Ok(GraphEvent::RunFinished { .. })) => {
                    let stop = state.chunks.stop();
                    state.pending.push_back(json_event(&stop));
                    state.pending.push_back(Event::default().data(DONE_SENTINEL));
                    state.done = true;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::error!(error = %e, "graph run failed mid-stream");
                    state.pending.push_back(error_event(e.to_string()));
                    state.done = true;
                }
                None => {
                    tracing::error!("graph event stream ended before the run finished");
                    state
                        .pending
                        .push_back(error_event("stream ended before the run finished"));
                    state.done = true;
                }
            }
        }
    })
}

/// Wraps the graph's event stream in an SSE response.
pub fn stream_response(events: EventStream, chunks: ChunkFactory) -> Response {
    let headers = [
        (
            HeaderName::from_static("cache-control"),
            HeaderValue::from_static("no-cache"),
        ),
        (
            HeaderName::from_static("x-accel-buffering"),
            HeaderValue::from_static("no"),
        ),
    ];
    (headers, Sse::new(completion_frames(events, chunks))).into_response()
}
