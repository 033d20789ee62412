//! Config file management.

use lazyfetch_config::{Config, Endpoint};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let path = global
                .config
                .clone()
                .unwrap_or_else(lazyfetch_config::config_path);
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let rendered = toml::to_string_pretty(&cfg)
                .map_err(lazyfetch_config::ConfigError::Serialization)?;
            output::print_output(&rendered, global.quiet);
            Ok(())
        }
    }
}

/// Write a starter config with one sample endpoint. Refuses to clobber.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = global
        .config
        .clone()
        .unwrap_or_else(lazyfetch_config::config_path);

    if path.exists() {
        return Err(CliError::ConfigExists {
            path: path.display().to_string(),
        });
    }

    let mut endpoints = std::collections::HashMap::new();
    endpoints.insert(
        "example".into(),
        Endpoint {
            url: "https://api.example.com/v1/items".into(),
            payload_key: Some("items".into()),
            ..Endpoint::default()
        },
    );
    let cfg = Config {
        default_endpoint: Some("example".into()),
        endpoints,
        ..Config::default()
    };

    lazyfetch_config::save_config_to(&cfg, &path)?;
    output::print_output(&format!("wrote {}", path.display()), global.quiet);
    Ok(())
}
