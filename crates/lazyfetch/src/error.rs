//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("invalid {field}: {reason}")]
    #[diagnostic(code(lazyfetch::validation))]
    Validation { field: String, reason: String },

    #[error("no endpoint given and no default_endpoint configured")]
    #[diagnostic(
        code(lazyfetch::no_endpoint),
        help(
            "Pass an endpoint profile name or an absolute URL,\n\
             or set default_endpoint with: lazyfetch config init"
        )
    )]
    NoEndpoint,

    #[error("fetch from '{target}' failed")]
    #[diagnostic(
        code(lazyfetch::fetch_failed),
        help("The failure details were printed above; re-run with -v for request logs.")
    )]
    FetchFailed { target: String },

    #[error(transparent)]
    #[diagnostic(code(lazyfetch::config))]
    Config(#[from] lazyfetch_config::ConfigError),

    #[error("transport setup failed: {0}")]
    #[diagnostic(code(lazyfetch::transport))]
    Transport(#[from] lazyfetch_api::Error),

    #[error("config file already exists at {path}")]
    #[diagnostic(code(lazyfetch::config_exists), help("Edit the existing file or remove it first."))]
    ConfigExists { path: String },

    #[error("IO error: {0}")]
    #[diagnostic(code(lazyfetch::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } | Self::NoEndpoint => exit_code::USAGE,
            Self::Config(_) | Self::ConfigExists { .. } => exit_code::CONFIG,
            _ => exit_code::GENERAL,
        }
    }
}
