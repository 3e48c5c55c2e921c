// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Hestia configuration system.

use hestia_config::diagnostic::ConfigError;
use hestia_config::{
    load_and_validate_path, load_and_validate_str, load_config_from_path, load_config_from_str,
};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[service]
name = "housing-bot"
log_level = "debug"

[server]
host = "0.0.0.0"
port = 8080
bearer_token = "letmein"

[openai]
api_key = "sk-test"
api_base = "http://localhost:11434/v1"
model = "llama3"
timeout_secs = 30
max_retries = 3

[generation]
temperature = 0.2
max_tokens = 256
max_tool_rounds = 2

[graph]
id = "housing"
"#;

    let config = load_config_from_str(toml).expect("valid toml");
    assert_eq!(config.service.name, "housing-bot");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.bearer_token.as_deref(), Some("letmein"));
    assert_eq!(config.openai.api_base, "http://localhost:11434/v1");
    assert_eq!(config.openai.max_retries, 3);
    assert_eq!(config.generation.max_tool_rounds, 2);
    assert_eq!(config.graph.id, "housing");
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = load_config_from_str("[server]\nport = 9000\n").unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.openai.model, "gpt-4o-mini");
}

#[test]
fn unknown_key_suggests_correction() {
    let errors = load_and_validate_str("[openai]\nmodle = \"gpt-4o\"\n").unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "modle");
            assert_eq!(suggestion.as_deref(), Some("model"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_rejected() {
    let errors = load_and_validate_str("[telegram]\nbot_token = \"x\"\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::UnknownKey { .. }));
}

#[test]
fn wrong_type_reported() {
    let errors = load_and_validate_str("[server]\nport = \"eighty\"\n").unwrap_err();
    match &errors[0] {
        ConfigError::InvalidType { key, .. } => assert_eq!(key, "server.port"),
        other => panic!("expected InvalidType, got {other:?}"),
    }
}

#[test]
fn semantic_errors_surface_from_validation() {
    let errors = load_and_validate_str("[generation]\ntemperature = 5.0\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

#[test]
fn hestia_env_overrides_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "[server]\nport = 9000\n[openai]\nmodel = \"from-file\"\n")?;
        jail.set_env("HESTIA_SERVER_PORT", "9100");
        jail.set_env("HESTIA_GENERATION_MAX_TOOL_ROUNDS", "7");

        let config = load_config_from_path("custom.toml".as_ref())?;
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.generation.max_tool_rounds, 7);
        assert_eq!(config.openai.model, "from-file");
        Ok(())
    });
}

#[test]
fn plain_openai_env_used_as_fallback() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "")?;
        jail.set_env("OPENAI_API_KEY", "sk-env");
        jail.set_env("OPENAI_MODEL", "gpt-4o");

        let config = load_config_from_path("custom.toml".as_ref())?;
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.openai.model, "gpt-4o");
        Ok(())
    });
}

#[test]
fn file_wins_over_plain_openai_env() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "[openai]\nmodel = \"from-file\"\n")?;
        jail.set_env("OPENAI_MODEL", "from-env");

        let config = load_config_from_path("custom.toml".as_ref())?;
        assert_eq!(config.openai.model, "from-file");
        Ok(())
    });
}

#[test]
fn prefixed_env_wins_over_plain_openai_env() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "")?;
        jail.set_env("OPENAI_API_KEY", "plain");
        jail.set_env("HESTIA_OPENAI_API_KEY", "prefixed");

        let config = load_config_from_path("custom.toml".as_ref())?;
        assert_eq!(config.openai.api_key.as_deref(), Some("prefixed"));
        Ok(())
    });
}

#[test]
fn explicit_path_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hestia.toml");
    std::fs::write(&path, "[graph]\nid = \"\"\n").unwrap();

    let errors = load_and_validate_path(&path).unwrap_err();
    assert!(errors[0].to_string().contains("graph.id"));
}
