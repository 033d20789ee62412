//! Paginated walk over a collection endpoint.

use std::str::FromStr;

use serde_json::Value;

use lazyfetch_core::{CollectionFetcher, KeyedParser, MergeMode};

use crate::cli::{GlobalOpts, PagesArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Payload key assumed when neither the flag nor the profile names one.
const DEFAULT_PAYLOAD_KEY: &str = "data";

pub async fn handle(args: PagesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let target = config::resolve_target(args.target, &cfg)?;
    let endpoint = lazyfetch_config::resolve_endpoint(&cfg, &target)?;
    let params = config::parse_params(&args.params)?;

    let mode = match args.mode {
        Some(ref raw) => MergeMode::from_str(raw).map_err(|_| CliError::Validation {
            field: "mode".into(),
            reason: format!("expected append, prepend, or replace, got '{raw}'"),
        })?,
        None => endpoint.mode.unwrap_or(MergeMode::Append),
    };
    let per_page = args
        .per_page
        .or(endpoint.per_page)
        .unwrap_or(cfg.defaults.per_page);
    let key = args
        .key
        .or_else(|| endpoint.payload_key.clone())
        .unwrap_or_else(|| DEFAULT_PAYLOAD_KEY.into());

    let ctx = super::build_context(&endpoint, &cfg.defaults, global)?;

    let fetcher = CollectionFetcher::new(
        ctx,
        &endpoint.url,
        Value::Array(Vec::new()),
        KeyedParser::<Value>::new(key),
    )
    .with_mode(mode)
    .with_per_page(per_page);

    // Ctrl-C cancels the in-flight request through the fetcher's token.
    let cancel = fetcher.cancellation_token();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let pages = match args.max_pages {
        None => fetcher.fetch_remaining(&params).await,
        Some(max) => {
            let mut pages = 0usize;
            while pages < max {
                if !fetcher.fetch_next(&params).await {
                    break;
                }
                pages += 1;
                if !fetcher.snapshot().has_more {
                    break;
                }
            }
            pages
        }
    };
    signal_task.abort();

    if pages == 0 {
        return Err(CliError::FetchFailed { target });
    }

    let state = fetcher.snapshot();
    let items = state.data.as_array().map_or(0, Vec::len);
    tracing::info!(pages, items, total = state.pagination.count, "walk complete");

    output::print_output(&output::render_value(&global.output, &state.data), global.quiet);
    Ok(())
}
