//! Command handlers.

pub mod config_cmd;
pub mod fetch;
pub mod pages;

use lazyfetch_api::Transport;
use lazyfetch_config::{Defaults, Endpoint};
use lazyfetch_core::{AlertSink, FetchContext};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

/// Alert sink for a terminal: fetch failures land on stderr.
struct StderrSink;

impl AlertSink for StderrSink {
    fn report_error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Build the composition-root context for one command invocation.
fn build_context(
    endpoint: &Endpoint,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<FetchContext, CliError> {
    let transport = Transport::new(&config::transport_for(endpoint, defaults, global))?;
    Ok(FetchContext::new(transport).with_alerts(StderrSink))
}
