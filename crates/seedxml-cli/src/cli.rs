//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "seedxml",
    version,
    about = "Export a record graph to dependency-ordered XML seed data",
    long_about = "Walk one record and everything it references up to a chosen depth, \
                  then write one XML seed-data file per model in which every \
                  cross-reference points at an already-declared record."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q to quiet down).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
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
    /// Export one record and its relations from a fixture file.
    Export(ExportArgs),

    /// List the models a fixture file defines.
    Models(ModelsArgs),
}

#[derive(Args)]
pub struct ExportArgs {
    /// JSON fixture describing models, entities and external identifiers.
    #[arg(value_name = "FIXTURE")]
    pub fixture: PathBuf,

    /// Model of the root record.
    #[arg(long, requires = "id", conflicts_with = "xid")]
    pub model: Option<String>,

    /// Numeric id of the root record.
    #[arg(long, requires = "model", conflicts_with = "xid")]
    pub id: Option<u64>,

    /// Address the root record by external identifier instead.
    #[arg(long, required_unless_present = "model")]
    pub xid: Option<String>,

    /// How many levels of related records to follow (0 = root only).
    #[arg(long, default_value_t = 0)]
    pub depth: u32,

    /// Anonymize text values and mark synthesized identifiers as demo data.
    #[arg(long)]
    pub demo: bool,

    /// Also declare records that already carry an external identifier.
    #[arg(long = "keep-duplicates")]
    pub keep_duplicates: bool,

    /// Drop fields whose read is denied instead of aborting the export.
    #[arg(long = "lenient-access")]
    pub lenient_access: bool,

    /// Exclude a field name from the export (repeatable).
    #[arg(long = "exclude-field", value_name = "FIELD")]
    pub exclude_field: Vec<String>,

    /// Directory the per-model XML files are written to.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "seed-data")]
    pub output_dir: PathBuf,

    /// Assemble and print the documents without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print a machine-readable JSON result instead of tables.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ModelsArgs {
    /// JSON fixture describing models, entities and external identifiers.
    #[arg(value_name = "FIXTURE")]
    pub fixture: PathBuf,
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
