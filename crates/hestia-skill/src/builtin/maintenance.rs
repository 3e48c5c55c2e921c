// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boiler lookup, repair guidance, and engineer booking.

use async_trait::async_trait;
use hestia_core::HestiaError;
use serde::Deserialize;
use strum::{Display, EnumString};

use crate::tool::{Tool, ToolOutput, parse_args};

/// How soon an engineer is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Emergency,
}

/// Looks up specifications and common faults for a boiler brand.
pub struct GetBoilerInfoTool;

#[derive(Deserialize)]
struct BoilerArgs {
    boiler_brand: String,
}

#[async_trait]
impl Tool for GetBoilerInfoTool {
    fn name(&self) -> &str {
        "get_boiler_info"
    }

    fn description(&self) -> &str {
        "Get information about a specific boiler brand: specifications and common issues."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "boiler_brand": {
                    "type": "string",
                    "description": "The brand of boiler (e.g., Baxi, Vaillant, Worcester)"
                }
            },
            "required": ["boiler_brand"]
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, HestiaError> {
        let args: BoilerArgs = parse_args(self.name(), input)?;
        Ok(ToolOutput::ok(format!(
            "Boiler information for {}",
            args.boiler_brand
        )))
    }
}

/// Returns repair and safety guidance for an issue type.
pub struct GetRepairGuidanceTool;

#[derive(Deserialize)]
struct GuidanceArgs {
    issue_type: String,
}

#[async_trait]
impl Tool for GetRepairGuidanceTool {
    fn name(&self) -> &str {
        "get_repair_guidance"
    }

    fn description(&self) -> &str {
        "Get repair guidance and safety information for specific housing issues."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issue_type": {
                    "type": "string",
                    "description": "The type of repair issue (heating, damp, repairs, etc.)"
                }
            },
            "required": ["issue_type"]
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, HestiaError> {
        let args: GuidanceArgs = parse_args(self.name(), input)?;
        Ok(ToolOutput::ok(format!(
            "Repair guidance for {}",
            args.issue_type
        )))
    }
}

/// Books an engineer visit.
pub struct ScheduleEngineerTool;

#[derive(Deserialize)]
struct ScheduleArgs {
    issue_type: String,
    urgency: Urgency,
}

#[async_trait]
impl Tool for ScheduleEngineerTool {
    fn name(&self) -> &str {
        "schedule_engineer"
    }

    fn description(&self) -> &str {
        "Schedule an engineer visit for the issue."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issue_type": {
                    "type": "string",
                    "description": "Type of issue requiring engineer"
                },
                "urgency": {
                    "type": "string",
                    "enum": ["low", "medium", "high", "emergency"],
                    "description": "Urgency level"
                }
            },
            "required": ["issue_type", "urgency"]
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, HestiaError> {
        let args: ScheduleArgs = parse_args(self.name(), input)?;
        tracing::info!(issue_type = %args.issue_type, urgency = %args.urgency, "engineer visit booked");
        Ok(ToolOutput::ok(format!(
            "Engineer scheduled for {} (urgency: {})",
            args.issue_type, args.urgency
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[tokio::test]
    async fn boiler_info_names_brand() {
        let output = GetBoilerInfoTool
            .invoke(serde_json::json!({"boiler_brand": "Worcester"}))
            .await
            .unwrap();
        assert_eq!(output.content, "Boiler information for Worcester");
    }

    #[tokio::test]
    async fn repair_guidance_names_issue() {
        let output = GetRepairGuidanceTool
            .invoke(serde_json::json!({"issue_type": "damp"}))
            .await
            .unwrap();
        assert_eq!(output.content, "Repair guidance for damp");
    }

    #[tokio::test]
    async fn schedule_engineer_confirms_urgency() {
        let output = ScheduleEngineerTool
            .invoke(serde_json::json!({"issue_type": "heating", "urgency": "emergency"}))
            .await
            .unwrap();
        assert_eq!(
            output.content,
            "Engineer scheduled for heating (urgency: emergency)"
        );
    }

    #[tokio::test]
    async fn schedule_engineer_rejects_unknown_urgency() {
        let err = ScheduleEngineerTool
            .invoke(serde_json::json!({"issue_type": "heating", "urgency": "whenever"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("schedule_engineer"));
    }

    #[test]
    fn urgency_parses_lowercase() {
        assert_eq!(Urgency::from_str("high").unwrap(), Urgency::High);
        assert_eq!(Urgency::Emergency.to_string(), "emergency");
    }
}
