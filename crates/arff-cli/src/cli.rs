//! CLI argument definitions for `arff-split`.

use std::path::PathBuf;

use arff_split::DEFAULT_SEED;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use arff_cli::archive::ARCHIVE_NAME;

#[derive(Parser)]
#[command(
    name = "arff-split",
    version,
    about = "Split ARFF datasets into train, validation and test sets",
    long_about = "Split an ARFF dataset into 60% train, 20% validation and 20% test.\n\n\
                  Uploads are decoded as UTF-8, Latin-1, ISO-8859-1 or Windows-1252,\n\
                  loose nominal lists are repaired, and the three parts are written\n\
                  as ARFF files packaged in a zip archive."
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
    /// Split an ARFF file and package the parts.
    Split(SplitArgs),

    /// Decode an ARFF file and show what was read.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct SplitArgs {
    /// ARFF file to split. Reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Column whose class proportions are kept in every part.
    #[arg(long = "stratify", value_name = "COLUMN")]
    pub stratify: Option<String>,

    /// Seed for the shuffles.
    #[arg(long = "seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Cut in input order instead of shuffling (not allowed with --stratify).
    #[arg(long = "no-shuffle")]
    pub no_shuffle: bool,

    /// Path of the zip archive to write.
    #[arg(long = "output", short = 'o', value_name = "PATH", default_value = ARCHIVE_NAME)]
    pub output: PathBuf,

    /// Write the three ARFF files into this directory instead of a zip.
    #[arg(long = "out-dir", value_name = "DIR", conflicts_with = "output")]
    pub out_dir: Option<PathBuf>,

    /// How failures are reported on stderr.
    #[arg(long = "error-format", value_enum, default_value = "text")]
    pub error_format: ErrorFormatArg,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// ARFF file to inspect. Reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Number of rows to preview.
    #[arg(long = "rows", default_value_t = 10)]
    pub rows: usize,
}

/// Failure report format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ErrorFormatArg {
    Text,
    /// `{"error": ..., "detail": ...}` on one line.
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
