// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Graph lookup by id.

use std::collections::HashMap;
use std::sync::Arc;

use hestia_core::HestiaError;

use crate::graph::Graph;

#[derive(Clone, Default)]
pub struct GraphRegistry {
    graphs: HashMap<String, Arc<dyn Graph>>,
}

impl GraphRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register under `graph.id()`, replacing any graph with the same id.
    pub fn register(&mut self, graph: Arc<dyn Graph>) {
        self.graphs.insert(graph.id().to_string(), graph);
    }

    pub fn get_graph(&self, id: &str) -> Result<Arc<dyn Graph>, HestiaError> {
        self.graphs
            .get(id)
            .cloned()
            .ok_or_else(|| HestiaError::GraphNotFound { id: id.to_string() })
    }

    /// Registered ids, sorted.
    pub fn list_graph_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.graphs.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl std::fmt::Debug for GraphRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphRegistry")
            .field("graphs", &self.list_graph_ids())
            .finish()
    }
}
