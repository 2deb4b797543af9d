//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options as clap sees them
//!
//! ```rust
//! use clap::Parser;
//! use slackdump::cli::{Args, OutputFormat};
//!
//! let args = Args::try_parse_from([
//!     "slackdump", "--token", "xoxb-1", "--channel", "C1", "--format", "csv",
//! ])
//! .unwrap();
//! assert_eq!(args.format, OutputFormat::Csv);
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ClientConfig, RateLimitPolicy};
use crate::logging::Verbosity;

/// Dump the message history of a Slack channel to JSON or CSV,
/// optionally filtered by time range, text pattern, and author.
#[derive(Parser, Debug, Clone)]
#[command(name = "slackdump")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    slackdump --token xoxb-... --channel C0123456789
    slackdump --channel C0123456789 --output dump/general.json
    slackdump --channel C0123456789 -o general.csv --format csv --limit 5000
    slackdump --channel C0123456789 --start-time 2024-01-01 --end-time \"2024-01-31 23:59:59\"
    slackdump --channel C0123456789 --regex 'deploy|release' --users U01 U02")]
pub struct Args {
    /// Slack bot token (xoxb-...)
    #[arg(long, env = "SLACK_BOT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Channel ID (C...)
    #[arg(long)]
    pub channel: String,

    /// Write all messages to this file instead of printing a preview
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Maximum number of messages to fetch
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Keep messages at or after this time (YYYY-MM-DD[ HH:MM[:SS]])
    #[arg(long, value_name = "TIME")]
    pub start_time: Option<String>,

    /// Keep messages at or before this time (YYYY-MM-DD[ HH:MM[:SS]])
    #[arg(long, value_name = "TIME")]
    pub end_time: Option<String>,

    /// Keep messages whose text matches this regular expression
    #[arg(long, value_name = "PATTERN")]
    pub regex: Option<String>,

    /// Match --regex case-sensitively
    #[arg(long)]
    pub case_sensitive: bool,

    /// Keep messages from these user IDs
    #[arg(long, value_name = "ID", num_args = 1..)]
    pub users: Option<Vec<String>>,

    /// Give up after this many consecutive rate-limited responses
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log request details
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, env = "SLACKDUMP_API_URL", hide = true)]
    pub api_url: Option<String>,
}

impl Args {
    /// Client settings derived from the flags.
    pub fn client_config(&self) -> ClientConfig {
        let mut policy = RateLimitPolicy::unbounded();
        if let Some(max) = self.max_retries {
            policy = policy.with_max_retries(max);
        }

        let mut config = ClientConfig::new().with_rate_limit(policy);
        if let Some(ref url) = self.api_url {
            config = config.with_base_url(url.as_str());
        }
        config
    }

    /// Fetch limit as a `usize`, saturating on narrow targets.
    pub fn fetch_limit(&self) -> Option<usize> {
        self.limit
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
    }

    /// Log verbosity from `-q` / `-v`.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

/// Output format options.
///
/// - [`Json`](OutputFormat::Json) - Structured array, every field (default)
/// - [`Csv`](OutputFormat::Csv) - Flat table for spreadsheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array of messages
    #[default]
    Json,

    /// CSV with a header row
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
        }
    }
}
