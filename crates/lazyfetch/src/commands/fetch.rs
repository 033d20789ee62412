//! One-shot fetch of a non-paginated endpoint.

use serde_json::Value;

use lazyfetch_core::{FetchContext, JsonParser, KeyedParser, ResponseParser, ValueFetcher};

use crate::cli::{FetchArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: FetchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let target = config::resolve_target(args.target, &cfg)?;
    let endpoint = lazyfetch_config::resolve_endpoint(&cfg, &target)?;
    let params = config::parse_params(&args.params)?;

    let ctx = super::build_context(&endpoint, &cfg.defaults, global)?;

    let key = args.key.or_else(|| endpoint.payload_key.clone());
    let data = match key {
        Some(key) => {
            run(ctx, &endpoint.url, KeyedParser::<Value>::new(key), &params, &target).await?
        }
        None => run(ctx, &endpoint.url, JsonParser::<Value>::new(), &params, &target).await?,
    };

    output::print_output(&output::render_value(&global.output, &data), global.quiet);
    Ok(())
}

async fn run<P: ResponseParser<Value>>(
    ctx: FetchContext,
    url: &str,
    parser: P,
    params: &[(String, String)],
    target: &str,
) -> Result<Value, CliError> {
    let fetcher = ValueFetcher::new(ctx, url, Value::Null, parser);

    if !fetcher.fetch(params).await {
        return Err(CliError::FetchFailed {
            target: target.to_owned(),
        });
    }

    Ok(fetcher.snapshot().data)
}
