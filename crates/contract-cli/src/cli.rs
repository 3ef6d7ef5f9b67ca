//! CLI argument definitions for the contract form tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "contract-forms",
    version,
    about = "Inspect contract template form schemas",
    long_about = "Build the fillable form schema for a supplier contract template.\n\n\
                  Reads the field envelope extracted from the template PDF and maps\n\
                  compiled values back to the template's own field names."
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

    /// Allow entered form values to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build and print the form schema of a template envelope.
    Schema(SchemaArgs),

    /// Re-key compiled values by the template's original field names.
    MapBack(MapBackArgs),

    /// List field categories in display order.
    Categories,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Field envelope JSON file, or `-` for stdin.
    #[arg(value_name = "ENVELOPE")]
    pub envelope: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: SchemaFormatArg,

    #[command(flatten)]
    pub normalizer: NormalizerArgs,
}

#[derive(Parser)]
pub struct MapBackArgs {
    /// Field envelope JSON file the values were compiled against.
    #[arg(value_name = "ENVELOPE")]
    pub envelope: PathBuf,

    /// JSON object of normalized key to value, or `-` for stdin.
    #[arg(value_name = "VALUES")]
    pub values: PathBuf,

    /// Check values against the schema and fail when problems are found.
    #[arg(long = "check")]
    pub check: bool,

    #[command(flatten)]
    pub normalizer: NormalizerArgs,
}

#[derive(Parser)]
pub struct NormalizerArgs {
    /// Length cap for fields that declare none.
    #[arg(long = "default-max-length", value_name = "CHARS")]
    pub default_max_length: Option<u32>,

    /// Declared lengths above this many characters render as a textarea.
    #[arg(long = "textarea-min-length", value_name = "CHARS")]
    pub textarea_min_length: Option<u32>,

    /// Only exempt `_2` duplicates from the required-field heuristic.
    #[arg(long = "second-duplicate-only")]
    pub second_duplicate_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SchemaFormatArg {
    Table,
    Json,
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
