// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE parsing for streamed chat completions.
//!
//! Each `data:` frame carries one JSON [`ChatChunk`]; the literal `[DONE]`
//! frame marks the end and is dropped.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures::stream::{Stream, StreamExt};
use hestia_core::HestiaError;

use crate::types::ChatChunk;

const DONE_SENTINEL: &str = "[DONE]";

/// Turn a streaming reqwest response into typed chunks.
pub fn parse_sse_stream(
    response: reqwest::Response,
) -> Pin<Box<dyn Stream<Item = Result<ChatChunk, HestiaError>> + Send>> {
    let events = response.bytes_stream().eventsource();

    Box::pin(events.filter_map(|result| async move {
        match result {
            Ok(event) => parse_frame(&event.data),
            Err(e) => Some(Err(HestiaError::provider(format!("SSE stream error: {e}")))),
        }
    }))
}

/// Parse one `data:` payload. `None` for the sentinel and blank keep-alives.
pub fn parse_frame(data: &str) -> Option<Result<ChatChunk, HestiaError>> {
    let data = data.trim();
    if data.is_empty() || data == DONE_SENTINEL {
        return None;
    }
    Some(
        serde_json::from_str::<ChatChunk>(data).map_err(|e| HestiaError::Provider {
            message: format!("failed to parse stream chunk: {e}"),
            source: Some(Box::new(e)),
        }),
    )
}
