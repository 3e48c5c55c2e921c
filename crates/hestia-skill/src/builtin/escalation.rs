// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hand-off to human support.

use async_trait::async_trait;
use hestia_core::HestiaError;
use serde::Deserialize;

use crate::tool::{Tool, ToolOutput, parse_args};

/// Escalates the conversation to a human agent.
pub struct EscalateToHumanTool;

#[derive(Deserialize)]
struct EscalateArgs {
    reason: String,
}

#[async_trait]
impl Tool for EscalateToHumanTool {
    fn name(&self) -> &str {
        "escalate_to_human"
    }

    fn description(&self) -> &str {
        "Escalate issue to human support."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "reason": { "type": "string", "description": "Reason for escalation" }
            },
            "required": ["reason"]
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, HestiaError> {
        let args: EscalateArgs = parse_args(self.name(), input)?;
        tracing::info!(reason = %args.reason, "escalated to human support");
        Ok(ToolOutput::ok(format!("Issue escalated \u{2013} {}", args.reason)))
    }
}
