// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for chat-completion model backends.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::error::HestiaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ProviderRequest, ProviderResponse, ProviderStreamChunk};

/// Boxed stream of provider chunks.
pub type ProviderStream =
    Pin<Box<dyn Stream<Item = Result<ProviderStreamChunk, HestiaError>> + Send>>;

/// Adapter for LLM provider integrations.
///
/// Provider adapters handle communication with language model APIs,
/// supporting both single-shot completion and streaming responses.
/// Timeouts and retries are the adapter's business; callers never retry.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, HestiaError>;

    /// Sends a completion request and returns a stream of response chunks.
    async fn stream(&self, request: ProviderRequest) -> Result<ProviderStream, HestiaError>;
}
