//! GlobalOpts-aware wrappers over `lazyfetch-config`.

use std::time::Duration;

use lazyfetch_api::{TlsMode, TransportConfig};
use lazyfetch_config::{Config, Defaults, Endpoint, endpoint_transport};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the config, honoring `--config`.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let cfg = match &global.config {
        Some(path) => lazyfetch_config::load_config_from(path)?,
        None => lazyfetch_config::load_config()?,
    };
    Ok(cfg)
}

/// Resolve the fetch target: explicit argument, else configured default.
pub fn resolve_target(target: Option<String>, cfg: &Config) -> Result<String, CliError> {
    target
        .or_else(|| cfg.default_endpoint.clone())
        .ok_or(CliError::NoEndpoint)
}

/// Profile transport settings with CLI flag overrides applied.
pub fn transport_for(
    endpoint: &Endpoint,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> TransportConfig {
    let mut transport = endpoint_transport(endpoint, defaults);

    if global.insecure {
        transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        transport.timeout = Duration::from_secs(secs);
    }

    transport
}

/// Parse repeatable `--param key=value` flags.
pub fn parse_params(raw: &[String]) -> Result<Vec<(String, String)>, CliError> {
    raw.iter()
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .ok_or_else(|| CliError::Validation {
                    field: "param".into(),
                    reason: format!("expected KEY=VALUE, got '{entry}'"),
                })
        })
        .collect()
}
