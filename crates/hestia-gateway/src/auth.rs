// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication for the `/v1` routes.
//!
//! Two [`AuthAdapter`] implementations are provided:
//! [`AnonymousAuth`] accepts every caller, [`BearerTokenAuth`] requires
//! `Authorization: Bearer <token>`. The middleware resolves the caller once
//! and stores the [`AuthIdentity`] as a request extension for handlers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use hestia_core::types::{AdapterType, AuthIdentity, HealthStatus};
use hestia_core::{AuthAdapter, HestiaError, PluginAdapter};

use crate::error::ApiError;

const ANONYMOUS_IDENTITY: &str = "anonymous";
const API_KEY_IDENTITY: &str = "api-key-user";

/// Accepts every request as `"anonymous"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousAuth;

#[async_trait]
impl PluginAdapter for AnonymousAuth {
    fn name(&self) -> &str {
        "anonymous"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Auth
    }

    async fn health_check(&self) -> Result<HealthStatus, HestiaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HestiaError> {
        Ok(())
    }
}

#[async_trait]
impl AuthAdapter for AnonymousAuth {
    async fn current_user(&self, _bearer_token: Option<&str>) -> Result<AuthIdentity, HestiaError> {
        Ok(AuthIdentity {
            identity: ANONYMOUS_IDENTITY.to_string(),
        })
    }
}

/// Accepts only callers presenting the configured token.
#[derive(Clone)]
pub struct BearerTokenAuth {
    token: String,
}

impl BearerTokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for BearerTokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuth")
            .field("token", &"[redacted]")
            .finish()
    }
}

#[async_trait]
impl PluginAdapter for BearerTokenAuth {
    fn name(&self) -> &str {
        "bearer-token"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Auth
    }

    async fn health_check(&self) -> Result<HealthStatus, HestiaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HestiaError> {
        Ok(())
    }
}

#[async_trait]
impl AuthAdapter for BearerTokenAuth {
    async fn current_user(&self, bearer_token: Option<&str>) -> Result<AuthIdentity, HestiaError> {
        match bearer_token {
            Some(token) if token == self.token => Ok(AuthIdentity {
                identity: API_KEY_IDENTITY.to_string(),
            }),
            Some(_) => Err(HestiaError::Unauthorized("invalid bearer token".into())),
            None => Err(HestiaError::Unauthorized("missing bearer token".into())),
        }
    }
}

/// Picks the adapter matching the configured token.
pub fn auth_from_token(bearer_token: Option<&str>) -> Arc<dyn AuthAdapter> {
    match bearer_token {
        Some(token) => Arc::new(BearerTokenAuth::new(token)),
        None => Arc::new(AnonymousAuth),
    }
}

/// Resolves the caller and attaches its [`AuthIdentity`] to the request.
pub async fn auth_middleware(
    State(auth): State<Arc<dyn AuthAdapter>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    match auth.current_user(token.as_deref()).await {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(adapter = auth.name(), error = %e, "rejected unauthenticated request");
            ApiError::Unauthorized(e.to_string()).into_response()
        }
    }
}
