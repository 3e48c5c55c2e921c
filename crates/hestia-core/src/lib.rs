// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Hestia housing assistant.
//!
//! Provides the error type, conversation message types, and the adapter traits
//! that provider and auth backends implement.

pub mod error;
pub mod traits;
pub mod types;

pub use error::HestiaError;
pub use traits::{AuthAdapter, PluginAdapter, ProviderAdapter, ProviderStream};
pub use types::{AdapterType, AuthIdentity, HealthStatus, Message, Role, ToolCall};
