//! CLI argument definitions for the recode tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "recode",
    version,
    about = "Recode numeric CSV columns into labelled categories",
    long_about = "Recode numeric CSV columns into labelled categories.\n\n\
                  A recode specification is a ';'-separated list of clauses such as\n\
                  \"min:9=1 [low]; 10:12=2 [moderate]; 13:max=3 [high]; else=NA\"."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Recode columns of a CSV file.
    Apply(ApplyArgs),

    /// Parse a recode specification and list its rules.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Input CSV file with a header row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Column to recode (repeat for several columns).
    #[arg(short = 'c', long = "column", value_name = "COLUMN", required = true)]
    pub columns: Vec<String>,

    /// Recode specification.
    #[arg(short = 's', long = "spec", value_name = "SPEC")]
    pub spec: String,

    /// Output CSV file (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Suffix for recoded column names.
    #[arg(long = "suffix", default_value = "_r")]
    pub suffix: String,

    /// Replace the source columns instead of adding suffixed copies.
    #[arg(long = "replace")]
    pub replace: bool,

    /// Write display labels instead of integer codes.
    #[arg(long = "labels")]
    pub labels: bool,

    /// Text written for missing values when --labels is set.
    #[arg(long = "missing-display", default_value = "NA")]
    pub missing_display: String,

    /// Write the code-to-label map of each recoded column as JSON.
    #[arg(long = "labels-json", value_name = "PATH")]
    pub labels_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Recode specification.
    #[arg(short = 's', long = "spec", value_name = "SPEC")]
    pub spec: String,

    /// Print the rules as JSON.
    #[arg(long = "json")]
    pub json: bool,
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
