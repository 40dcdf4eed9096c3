//! CLI argument definitions for the import value filter.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ivf",
    version,
    about = "Import value filter - normalize imported field values",
    long_about = "Normalize imported field values with replacement dictionaries\n\
                  and canonical date formatting.\n\n\
                  Dictionaries and date settings are read from a TOML or JSON\n\
                  configuration file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow imported values to appear in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize one or more values for a field.
    Normalize(NormalizeArgs),

    /// Load a configuration file and summarize its contents.
    Config(ConfigArgs),

    /// Evaluate the "create if missing" permission gates for a user.
    Permissions(PermissionsArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Filter configuration file (.toml or .json).
    #[arg(long = "config", short = 'c', value_name = "FILE")]
    pub config: PathBuf,
}

#[derive(Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Field the values were imported into.
    #[arg(long = "field", short = 'f', value_name = "NAME")]
    pub field: String,

    /// Category id; selects the per-category dictionary path.
    ///
    /// Values that are not a non-negative integer match no category.
    #[arg(long = "category", value_name = "ID")]
    pub category: Option<String>,

    /// Reference time for the past-date check (RFC 3339, default: now).
    #[arg(long = "now", value_name = "TIMESTAMP", value_parser = parse_reference_time)]
    pub now: Option<NaiveDateTime>,

    /// Print one JSON object per value instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    /// Values to normalize.
    #[arg(value_name = "VALUE", required = true)]
    pub values: Vec<String>,
}

#[derive(Args)]
pub struct PermissionsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// User roles, primary role first.
    #[arg(long = "role", value_name = "ROLE")]
    pub roles: Vec<String>,

    /// Answer the host would give without this filter.
    #[arg(long = "allow-default")]
    pub allow_default: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Parse `--now`: RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS` taken as UTC.
pub fn parse_reference_time(raw: &str) -> Result<NaiveDateTime, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))
}
