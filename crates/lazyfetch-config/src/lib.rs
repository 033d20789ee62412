//! Shared configuration for lazyfetch tools.
//!
//! TOML endpoint profiles with figment layering (defaults → file →
//! `LAZYFETCH_*` environment) and translation into transport/fetcher
//! settings. The CLI depends on this crate; libraries embedding the
//! engine can skip it and build a `FetchContext` directly.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lazyfetch_api::{TlsMode, TransportConfig};
use lazyfetch_core::MergeMode;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no endpoint named '{name}' and the value is not a URL")]
    UnknownEndpoint { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Default endpoint profile name.
    pub default_endpoint: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named endpoint profiles.
    #[serde(default)]
    pub endpoints: HashMap<String, Endpoint>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            timeout: default_timeout(),
            output: default_output(),
            insecure: false,
        }
    }
}

fn default_per_page() -> u32 {
    20
}
fn default_timeout() -> u64 {
    30
}
fn default_output() -> String {
    "table".into()
}

/// A named endpoint profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Endpoint {
    /// Absolute endpoint URL (e.g. "https://api.example.com/v1/orders").
    pub url: String,

    /// Payload key inside the response envelope (paginated endpoints).
    pub payload_key: Option<String>,

    /// Merge policy for successive pages.
    pub mode: Option<MergeMode>,

    /// Override the default page size.
    pub per_page: Option<u32>,

    /// Override the default timeout (seconds).
    pub timeout: Option<u64>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("rs", "lazyfetch", "lazyfetch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("lazyfetch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full `Config` from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path, layered under `LAZYFETCH_*` env vars.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LAZYFETCH_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Endpoint resolution ─────────────────────────────────────────────

/// Resolve a CLI target (profile name or literal URL) to an `Endpoint`.
///
/// A name present in `endpoints` wins; otherwise the target must parse
/// as an absolute http(s) URL and becomes an ad-hoc profile.
pub fn resolve_endpoint(cfg: &Config, target: &str) -> Result<Endpoint, ConfigError> {
    if let Some(endpoint) = cfg.endpoints.get(target) {
        return Ok(endpoint.clone());
    }

    match target.parse::<url::Url>() {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Endpoint {
            url: target.to_owned(),
            ..Endpoint::default()
        }),
        _ => Err(ConfigError::UnknownEndpoint {
            name: target.to_owned(),
        }),
    }
}

/// Translate an endpoint profile into a `TransportConfig`.
pub fn endpoint_transport(endpoint: &Endpoint, defaults: &Defaults) -> TransportConfig {
    let tls = if endpoint.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = endpoint.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(endpoint.timeout.unwrap_or(defaults.timeout)),
        default_headers: None,
    }
}
