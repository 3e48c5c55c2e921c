// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Progress callbacks from a specialist turn.

use async_trait::async_trait;

/// Receives model tokens and tool activity as a turn runs.
///
/// Awaited inline, so a slow observer slows the turn.
#[async_trait]
pub trait TurnObserver: Send + Sync {
    /// A fragment of model-generated text, in arrival order.
    async fn on_token(&self, _text: &str) {}

    async fn on_tool_start(&self, _tool: &str) {}

    async fn on_tool_end(&self, _tool: &str, _is_error: bool) {}
}

/// Ignores everything. Used for blocking runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

#[async_trait]
impl TurnObserver for NoopObserver {}
