// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication adapter trait for resolving the calling user.

use async_trait::async_trait;

use crate::error::HestiaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::AuthIdentity;

/// Resolves the identity behind an inbound request.
///
/// Receives the bearer token from the `Authorization` header, if one was sent.
#[async_trait]
pub trait AuthAdapter: PluginAdapter {
    async fn current_user(&self, bearer_token: Option<&str>) -> Result<AuthIdentity, HestiaError>;
}
