// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization checks that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::HestiaConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &HestiaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.service.name.trim().is_empty() {
        fail("service.name must not be empty".to_string());
    }

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        fail(format!(
            "service.log_level `{}` must be one of: {}",
            config.service.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.server.host.trim().is_empty() {
        fail("server.host must not be empty".to_string());
    }

    if config.server.port == 0 {
        fail("server.port must be non-zero".to_string());
    }

    if config
        .server
        .bearer_token
        .as_deref()
        .is_some_and(|t| t.trim().is_empty())
    {
        fail("server.bearer_token must not be blank when set".to_string());
    }

    let base = &config.openai.api_base;
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        fail(format!(
            "openai.api_base `{base}` must start with http:// or https://"
        ));
    }

    if config.openai.model.trim().is_empty() {
        fail("openai.model must not be empty".to_string());
    }

    if config.openai.timeout_secs == 0 {
        fail("openai.timeout_secs must be at least 1".to_string());
    }

    let temperature = config.generation.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        fail(format!(
            "generation.temperature must be between 0 and 2, got {temperature}"
        ));
    }

    if config.generation.max_tokens < 1 {
        fail("generation.max_tokens must be at least 1".to_string());
    }

    if config.generation.max_tool_rounds < 1 {
        fail("generation.max_tool_rounds must be at least 1".to_string());
    }

    if config.graph.id.trim().is_empty() {
        fail("graph.id must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(errors: &[ConfigError]) -> Vec<String> {
        errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&HestiaConfig::default()).is_ok());
    }

    #[test]
    fn zero_port_rejected() {
        let mut config = HestiaConfig::default();
        config.server.port = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors)[0].contains("server.port"));
    }

    #[test]
    fn api_base_without_scheme_rejected() {
        let mut config = HestiaConfig::default();
        config.openai.api_base = "api.openai.com/v1".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors)[0].contains("openai.api_base"));
    }

    #[test]
    fn temperature_bounds_inclusive() {
        let mut config = HestiaConfig::default();
        config.generation.temperature = 2.0;
        assert!(validate_config(&config).is_ok());
        config.generation.temperature = 2.1;
        assert!(validate_config(&config).is_err());
        config.generation.temperature = -0.1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn unknown_log_level_rejected() {
        let mut config = HestiaConfig::default();
        config.service.log_level = "verbose".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors)[0].contains("service.log_level"));
    }

    #[test]
    fn all_errors_collected() {
        let mut config = HestiaConfig::default();
        config.server.host = " ".into();
        config.openai.model = String::new();
        config.generation.max_tokens = 0;
        config.generation.max_tool_rounds = 0;
        config.graph.id = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
    }
}
