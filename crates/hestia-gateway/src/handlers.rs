// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the OpenAI-compatible surface.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use axum::response::{IntoResponse, Response};
use hestia_core::types::AuthIdentity;

use crate::completion::{self, completion_id, to_internal_messages};
use crate::error::ApiError;
use crate::server::GatewayState;
use crate::sse::{self, ChunkFactory};
use crate::types::{ChatCompletionRequest, HealthResponse, ModelObject, ModelsResponse};

/// GET /v1/models
pub async fn list_models(State(state): State<GatewayState>) -> Json<ModelsResponse> {
    let data = state
        .registry
        .list_graph_ids()
        .into_iter()
        .map(ModelObject::new)
        .collect();
    Json(ModelsResponse {
        object: "list".to_string(),
        data,
    })
}

/// GET /v1/models/{id}
pub async fn get_model(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<ModelObject>, ApiError> {
    let graph = state.registry.get_graph(&id)?;
    Ok(Json(ModelObject::new(graph.id())))
}

/// GET /v1/health and GET /health
pub async fn health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.service_name.clone(),
    })
}

/// POST /v1/chat/completions
///
/// Validates the body, resolves `model` to a graph and runs it either to
/// completion or as an SSE stream depending on `stream`.
pub async fn chat_completions(
    State(state): State<GatewayState>,
    Extension(identity): Extension<AuthIdentity>,
    body: Result<Json<ChatCompletionRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;
    let graph = state.registry.get_graph(&request.model)?;
    let config = completion::run_config(&request, &identity.identity)?;

    tracing::info!(
        graph_id = graph.id(),
        thread_id = %config.thread_id,
        user = %identity.identity,
        stream = request.stream,
        "chat completion requested"
    );

    if request.stream {
        let events = graph.stream_events(to_internal_messages(&request.messages), config);
        let chunks = ChunkFactory::new(completion_id(), request.model.clone());
        return Ok(sse::stream_response(events, chunks));
    }

    let response = completion::complete(graph.as_ref(), &request, config).await?;
    Ok(Json(response).into_response())
}
