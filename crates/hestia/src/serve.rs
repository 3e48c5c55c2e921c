// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hestia serve`: assemble the routing graph and run the gateway.

use std::sync::Arc;

use hestia_config::HestiaConfig;
use hestia_core::{HestiaError, ProviderAdapter};
use hestia_gateway::{GatewayState, auth_from_token, start_server};
use hestia_graph::{GraphRegistry, InMemoryThreadStore, RoutingGraph};
use hestia_openai::OpenAiProvider;
use hestia_skill::{ToolRegistry, register_builtins};
use tracing::info;

use crate::shutdown;

/// Runs the server until SIGINT or SIGTERM.
pub async fn run_serve(config: HestiaConfig) -> Result<(), HestiaError> {
    init_tracing(&config.service.log_level);

    info!(
        service = %config.service.name,
        model = %config.openai.model,
        graph_id = %config.graph.id,
        "starting hestia serve"
    );

    let provider: Arc<dyn ProviderAdapter> = Arc::new(OpenAiProvider::new(&config)?);

    let mut tools = ToolRegistry::new();
    register_builtins(&mut tools);
    info!(tools = ?tools.names(), "tool registry ready");

    let store = Arc::new(InMemoryThreadStore::new());
    let graph = RoutingGraph::from_config(&config, provider.clone(), Arc::new(tools), store);

    let mut registry = GraphRegistry::new();
    registry.register(Arc::new(graph));
    info!(graphs = ?registry.list_graph_ids(), "graph registry ready");

    let auth = auth_from_token(config.server.bearer_token.as_deref());
    info!(auth = auth.name(), "gateway auth configured");

    let state = GatewayState {
        registry: Arc::new(registry),
        auth,
        service_name: config.service.name.clone(),
    };

    let cancel = shutdown::install_signal_handler();
    start_server(&config.server, state, cancel.cancelled_owned()).await?;

    provider.shutdown().await?;
    info!("hestia serve shutdown complete");
    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the config.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hestia={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
