// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge base search.

use async_trait::async_trait;
use hestia_core::HestiaError;
use serde::Deserialize;

use crate::tool::{Tool, ToolOutput, parse_args};

/// Searches the UK housing knowledge base. Stub: echoes the query.
pub struct SearchHousingKnowledgeTool;

#[derive(Deserialize)]
struct SearchArgs {
    query: String,
}

#[async_trait]
impl Tool for SearchHousingKnowledgeTool {
    fn name(&self) -> &str {
        "search_housing_knowledge"
    }

    fn description(&self) -> &str {
        "Search the UK housing knowledge base for relevant information."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query about housing issues"
                }
            },
            "required": ["query"]
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, HestiaError> {
        let args: SearchArgs = parse_args(self.name(), input)?;
        Ok(ToolOutput::ok(format!(
            "Knowledge base results for: {}",
            args.query
        )))
    }
}
