// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading with Figment.
//!
//! Merge order (later overrides earlier): compiled defaults, the plain
//! `OPENAI_*` variables, `/etc/hestia/hestia.toml`,
//! `~/.config/hestia/hestia.toml`, `./hestia.toml`, then `HESTIA_*` variables.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HestiaConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/hestia/hestia.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "hestia.toml";

/// Sections addressable through `HESTIA_<SECTION>_<KEY>`.
const SECTIONS: &[&str] = &["service", "server", "openai", "generation", "graph"];

/// Path of the per-user config file, if a config dir exists on this platform.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hestia").join(LOCAL_CONFIG_FILE))
}

/// Build the full layered Figment without extracting it.
pub fn build_figment() -> Figment {
    let mut figment = base_figment().merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Load configuration from the standard file hierarchy with env overrides.
pub fn load_config() -> Result<HestiaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from one explicit file plus env overrides.
pub fn load_config_from_path(path: &Path) -> Result<HestiaConfig, figment::Error> {
    base_figment()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only. No files, no environment.
pub fn load_config_from_str(toml_content: &str) -> Result<HestiaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HestiaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

fn base_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(HestiaConfig::default()))
        .merge(openai_fallback_provider())
}

/// `OPENAI_API_KEY`, `OPENAI_API_BASE`, and `OPENAI_MODEL` as low-priority fallbacks.
fn openai_fallback_provider() -> Env {
    Env::raw()
        .only(&["OPENAI_API_KEY", "OPENAI_API_BASE", "OPENAI_MODEL"])
        .map(|key| {
            key.as_str()
                .to_ascii_lowercase()
                .replacen("openai_", "openai.", 1)
                .into()
        })
}

/// `HESTIA_*` variables mapped to `section.key`.
///
/// Splits on the section prefix rather than on every underscore so keys like
/// `max_tool_rounds` stay intact.
fn env_provider() -> Env {
    Env::prefixed("HESTIA_").map(|key| map_env_key(key.as_str()).into())
}

/// Figment passes keys in their original case; lowercasing happens after mapping.
fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}
