// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hestia - triage assistant for social housing tenants behind an
//! OpenAI-compatible API.

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hestia_config::{ConfigError, HestiaConfig};

/// Hestia command-line interface.
#[derive(Parser, Debug)]
#[command(name = "hestia", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the OpenAI-compatible HTTP server.
    Serve {
        /// Config file to use instead of the standard search path.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate configuration and print the effective settings.
    CheckConfig {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<HestiaConfig, Vec<ConfigError>> {
    match path {
        Some(path) => hestia_config::load_and_validate_path(path),
        None => hestia_config::load_and_validate(),
    }
}

fn load_or_exit(path: Option<&PathBuf>) -> HestiaConfig {
    match load_config(path) {
        Ok(config) => config,
        Err(errors) => {
            hestia_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

/// Effective configuration as TOML, secrets replaced.
fn render_effective_config(config: &HestiaConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&config.redacted())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            let config = load_or_exit(config.as_ref());
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Commands::CheckConfig { config } => {
            let config = load_or_exit(config.as_ref());
            match render_effective_config(&config) {
                Ok(rendered) => {
                    eprintln!("hestia: configuration is valid");
                    println!("{rendered}");
                }
                Err(e) => {
                    eprintln!("error: failed to render configuration: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_with_config() {
        let cli = Cli::try_parse_from(["hestia", "serve", "--config", "/tmp/h.toml"]).unwrap();
        match cli.command {
            Commands::Serve { config } => assert_eq!(config, Some(PathBuf::from("/tmp/h.toml"))),
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn parses_check_config() {
        let cli = Cli::try_parse_from(["hestia", "check-config"]).unwrap();
        assert!(matches!(cli.command, Commands::CheckConfig { config: None }));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["hestia"]).is_err());
    }

    #[test]
    fn effective_config_hides_secrets() {
        let config = hestia_config::load_and_validate_str(
            r#"
[server]
bearer_token = "gateway-secret"

[openai]
api_key = "sk-live-123"
"#,
        )
        .unwrap();
        let rendered = render_effective_config(&config).unwrap();
        assert!(!rendered.contains("sk-live-123"));
        assert!(!rendered.contains("gateway-secret"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(rendered.contains("uk_housing"));
    }
}
