// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait and name-indexed registry.
//!
//! The registry produces OpenAI function-format definitions for provider
//! requests and executes model-requested calls, turning every failure into an
//! error result the model can read.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use hestia_core::HestiaError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Output from a tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: String,
    /// Whether the content describes a failure.
    pub is_error: bool,
}

impl ToolOutput {
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// A named capability the model may invoke with JSON arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name, used for lookup and in the function definition.
    fn name(&self) -> &str;

    /// Description shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema of the argument object.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Runs the tool on already-parsed arguments.
    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, HestiaError>;
}

/// Deserialize tool arguments, mapping serde failures to [`HestiaError::Tool`].
pub fn parse_args<T: DeserializeOwned>(
    tool: &str,
    input: serde_json::Value,
) -> Result<T, HestiaError> {
    serde_json::from_value(input).map_err(|e| HestiaError::Tool {
        name: tool.to_string(),
        message: format!("invalid arguments: {e}"),
    })
}

/// Registry of available tools, indexed by name.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under its `name()`, replacing any previous entry.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// OpenAI function-format definitions, sorted by name:
    ///
    /// ```json
    /// {"type": "function", "function": {"name": "...", "description": "...", "parameters": {...}}}
    /// ```
    pub fn tool_definitions(&self) -> Vec<serde_json::Value> {
        self.names()
            .into_iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": t.name(),
                        "description": t.description(),
                        "parameters": t.parameters_schema(),
                    }
                })
            })
            .collect()
    }

    /// Execute a model-requested call given its raw JSON argument text.
    ///
    /// Never fails: unknown tools, unparseable arguments, and tool errors all
    /// come back as an error [`ToolOutput`].
    pub async fn execute(&self, name: &str, raw_arguments: &str) -> ToolOutput {
        let Some(tool) = self.get(name) else {
            warn!(tool = name, "model requested unknown tool");
            return ToolOutput::error(format!("Error: unknown tool `{name}`"));
        };

        let arguments = if raw_arguments.trim().is_empty() {
            serde_json::Value::Object(Default::default())
        } else {
            match serde_json::from_str(raw_arguments) {
                Ok(value) => value,
                Err(e) => {
                    warn!(tool = name, error = %e, "tool arguments are not valid JSON");
                    return ToolOutput::error(format!(
                        "Error: arguments for `{name}` are not valid JSON: {e}"
                    ));
                }
            }
        };

        match tool.invoke(arguments).await {
            Ok(output) => {
                debug!(tool = name, is_error = output.is_error, "tool finished");
                output
            }
            Err(e) => {
                warn!(tool = name, error = %e, "tool failed");
                ToolOutput::error(format!("Error: {e}"))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[derive(Deserialize)]
    struct EchoArgs {
        message: String,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes the input back"
        }

        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": { "message": { "type": "string" } },
                "required": ["message"]
            })
        }

        async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, HestiaError> {
            let args: EchoArgs = parse_args(self.name(), input)?;
            Ok(ToolOutput::ok(args.message))
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str {
            "always_fails"
        }

        fn description(&self) -> &str {
            "Fails"
        }

        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({ "type": "object", "properties": {} })
        }

        async fn invoke(&self, _input: serde_json::Value) -> Result<ToolOutput, HestiaError> {
            Err(HestiaError::Tool {
                name: "always_fails".into(),
                message: "backend offline".into(),
            })
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FailingTool));
        registry.register(Arc::new(EchoTool));
        registry
    }

    #[test]
    fn definitions_are_function_format_and_sorted() {
        let defs = registry().tool_definitions();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0]["type"], "function");
        assert_eq!(defs[0]["function"]["name"], "always_fails");
        assert_eq!(defs[1]["function"]["name"], "echo");
        assert_eq!(defs[1]["function"]["parameters"]["required"][0], "message");
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = registry();
        registry.register(Arc::new(EchoTool));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.tool_definitions().is_empty());
    }

    #[tokio::test]
    async fn execute_runs_tool() {
        let output = registry().execute("echo", r#"{"message":"hi"}"#).await;
        assert_eq!(output, ToolOutput::ok("hi"));
    }

    #[tokio::test]
    async fn execute_unknown_tool_is_error_result() {
        let output = registry().execute("teleport", "{}").await;
        assert!(output.is_error);
        assert!(output.content.contains("teleport"));
    }

    #[tokio::test]
    async fn execute_bad_json_is_error_result() {
        let output = registry().execute("echo", "{not json").await;
        assert!(output.is_error);
        assert!(output.content.contains("not valid JSON"));
    }

    #[tokio::test]
    async fn execute_missing_argument_is_error_result() {
        let output = registry().execute("echo", "{}").await;
        assert!(output.is_error);
        assert!(output.content.contains("message"));
    }

    #[tokio::test]
    async fn execute_tool_error_is_error_result() {
        let output = registry().execute("always_fails", "").await;
        assert!(output.is_error);
        assert!(output.content.contains("backend offline"));
    }
}
