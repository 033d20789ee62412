//! Clap derive structures for the `lazyfetch` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lazyfetch -- fetch and page through remote JSON collections
#[derive(Debug, Parser)]
#[command(
    name = "lazyfetch",
    version,
    about = "Fetch remote JSON collections with pagination merge semantics",
    long_about = "A command-line client for paginated JSON endpoints.\n\n\
        Endpoints can be named profiles from the config file or literal URLs.\n\
        Paginated walks merge pages under an append/prepend/replace policy,\n\
        mirroring how admin UIs accumulate \"Load more\" results.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the config file (defaults to the platform config dir)
    #[arg(long, env = "LAZYFETCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LAZYFETCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "LAZYFETCH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile and defaults)
    #[arg(long, env = "LAZYFETCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// One-shot fetch of a non-paginated endpoint
    #[command(alias = "get")]
    Fetch(FetchArgs),

    /// Walk a paginated endpoint, merging pages
    #[command(alias = "p")]
    Pages(PagesArgs),

    /// Manage the config file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Endpoint profile name or absolute URL
    pub target: Option<String>,

    /// Payload key to extract from the response envelope
    #[arg(long)]
    pub key: Option<String>,

    /// Extra query parameter, key=value (repeatable)
    #[arg(long = "param", short = 'P', value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

#[derive(Debug, Args)]
pub struct PagesArgs {
    /// Endpoint profile name or absolute URL
    pub target: Option<String>,

    /// Merge policy: append, prepend, or replace
    #[arg(long)]
    pub mode: Option<String>,

    /// Page size sent as per_page
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Payload key inside the response envelope
    #[arg(long)]
    pub key: Option<String>,

    /// Stop after at most this many pages
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Extra query parameter, key=value (repeatable)
    #[arg(long = "param", short = 'P', value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,
    /// Write a starter config file
    Init,
    /// Print the effective configuration
    Show,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
