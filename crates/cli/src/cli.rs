//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Superstore Report - sales dashboard for the Superstore order dataset
#[derive(Parser, Debug)]
#[command(
    name = "superstore-report",
    author,
    version,
    about = "Superstore sales dashboard in the terminal",
    long_about = "Loads the Superstore order CSV once, filters it by region and category,\n\
                  and renders sales/profit metrics, category, time series and top-product\n\
                  charts to the configured sinks."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SUPERSTORE_REPORT_VERBOSE")]
    pub verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format (logs go to stderr)
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "SUPERSTORE_REPORT_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the report once for a selection
    Render(RenderArgs),

    /// Interactive session: read selection changes from stdin, re-render on each
    Session(SessionArgs),

    /// Validate configuration file (and optionally the data source)
    Validate(ValidateArgs),

    /// Summarize the dataset
    Info(InfoArgs),
}

/// Where the blueprint and data come from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "SUPERSTORE_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the CSV data path (enough on its own when no config is given)
    #[arg(short, long, env = "SUPERSTORE_REPORT_DATA")]
    pub data: Option<PathBuf>,

    /// Override the declared source encoding (WHATWG label, e.g. latin1, utf-8)
    #[arg(long, env = "SUPERSTORE_REPORT_ENCODING")]
    pub encoding: Option<String>,

    /// Show the sales-by-state map
    #[arg(long)]
    pub state_map: bool,
}

/// Arguments for the `render` command
#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Regions to include (repeatable; default: all observed regions)
    #[arg(long = "region", value_name = "REGION")]
    pub regions: Vec<String>,

    /// Categories to include (repeatable; default: all observed categories)
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<String>,
}

/// Arguments for the `session` command
#[derive(Parser, Debug, Clone)]
pub struct SessionArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Skip the session summary printed to stderr at the end
    #[arg(long)]
    pub no_summary: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(
        short,
        long,
        default_value = "config.toml",
        env = "SUPERSTORE_REPORT_CONFIG"
    )]
    pub config: PathBuf,

    /// Also load the data source and report its row count
    #[arg(long)]
    pub check_data: bool,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
