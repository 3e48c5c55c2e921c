// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible HTTP gateway.
//!
//! Exposes registered graphs as "models" under `/v1/models` and runs them
//! through `/v1/chat/completions`, either blocking or as an SSE stream.

pub mod auth;
pub mod completion;
pub mod error;
pub mod handlers;
pub mod server;
pub mod sse;
pub mod types;

pub use auth::{AnonymousAuth, BearerTokenAuth, auth_from_token};
pub use error::ApiError;
pub use server::{GatewayState, build_router, start_server};
