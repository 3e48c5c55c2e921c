// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP error mapping. Every error body is `{"detail": "..."}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hestia_core::HestiaError;

use crate::types::ErrorResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    NotFound(String),
    Validation(String),
    Unauthorized(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ApiError::NotFound(d)
            | ApiError::Validation(d)
            | ApiError::Unauthorized(d)
            | ApiError::Internal(d) => d,
        }
    }
}

impl From<HestiaError> for ApiError {
    fn from(err: HestiaError) -> Self {
        match err {
            HestiaError::GraphNotFound { .. } => ApiError::NotFound(err.to_string()),
            HestiaError::Validation(message) => ApiError::Validation(message),
            HestiaError::Unauthorized(message) => ApiError::Unauthorized(message),
            other => ApiError::Internal(format!("Error processing request: {other}")),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            detail: self.detail().to_string(),
        });
        (status, body).into_response()
    }
}
