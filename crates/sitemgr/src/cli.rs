//! Clap derive structures for the `sitemgr` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sitemgr -- query the UniFi Site Manager API
#[derive(Debug, Parser)]
#[command(
    name = "sitemgr",
    version,
    about = "Query UniFi Site Manager sites, devices and clients from the command line",
    long_about = "A small CLI over the UniFi Site Manager API.\n\n\
        Collection commands follow offset/limit pagination transparently\n\
        and print one aggregated result.",
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
    /// Profile to use from the config file
    #[arg(long, short = 'p', env = "SITEMGR_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Path to the config file (defaults to the platform config dir)
    #[arg(long, env = "SITEMGR_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides profile)
    #[arg(long, env = "SITEMGR_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// API version path segment (overrides profile)
    #[arg(long, env = "SITEMGR_API_VERSION", global = true)]
    pub api_version: Option<String>,

    /// Site Manager API key
    #[arg(long, env = "SITEMGR_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SITEMGR_OUTPUT",
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

    /// Skip TLS certificate verification
    #[arg(long, short = 'k', env = "SITEMGR_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "SITEMGR_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output ───────────────────────────────────────────────────────────

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
    /// Plain text, one ID per line (scripting)
    Plain,
}

impl OutputFormat {
    /// JSON and YAML print the full response structure.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Json | Self::JsonCompact | Self::Yaml)
    }
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List sites visible to the API key
    #[command(alias = "s")]
    Sites,

    /// List devices of a site
    #[command(alias = "dev", alias = "d")]
    Devices(CollectionArgs),

    /// List clients of a site
    #[command(alias = "cl")]
    Clients(CollectionArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments shared by the site-scoped collection commands.
#[derive(Debug, Args)]
pub struct CollectionArgs {
    /// Site ID
    pub site_id: String,

    /// Stop after this many items
    #[arg(long, short = 'n')]
    pub max_items: Option<usize>,

    /// Filter expression, passed to the API verbatim
    #[arg(long, short = 'f')]
    pub filter: Option<String>,

    /// Items requested per page
    #[arg(long, default_value = "100")]
    pub page_size: usize,

    /// Print the bare item list instead of the aggregated envelope (json/yaml)
    #[arg(long)]
    pub list: bool,
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
    /// Show the loaded configuration with secrets masked
    Show,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
