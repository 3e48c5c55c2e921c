// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Hestia workspace.

use thiserror::Error;

/// The primary error type used across adapter traits and the routing core.
#[derive(Debug, Error)]
pub enum HestiaError {
    /// Configuration errors (invalid TOML, missing credentials, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The upstream model provider failed (network, HTTP status, malformed body).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No graph is registered under the requested id.
    #[error("Graph/Model '{id}' not found")]
    GraphNotFound { id: String },

    /// Request failed schema or range validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A tool rejected its arguments or failed to run.
    #[error("tool `{name}` failed: {message}")]
    Tool { name: String, message: String },

    /// The caller could not be authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HestiaError {
    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }
}
