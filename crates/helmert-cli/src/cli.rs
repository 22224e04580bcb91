//! CLI argument definitions for the Helmert encoder.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "helmert",
    version,
    about = "Helmert contrast coding for categorical CSV columns",
    long_about = "Encode categorical CSV columns as Helmert contrasts.\n\n\
                  Each encoded column with k categories becomes k-1 numeric\n\
                  columns, and an intercept column of ones is prepended."
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
    /// Fit on a CSV file and write its encoded form.
    Encode(EncodeArgs),

    /// Fit on a CSV file and save the fitted encoder as JSON.
    Fit(FitArgs),

    /// Encode a CSV file with a previously saved encoder.
    Transform(TransformArgs),

    /// Print the contrast matrices of a saved encoder.
    Inspect(InspectArgs),
}

/// Options shared by every command that fits an encoder.
#[derive(Args)]
pub struct EncoderArgs {
    /// Columns to encode (default: every string column).
    #[arg(long = "cols", value_name = "COLS", value_delimiter = ',')]
    pub cols: Option<Vec<String>>,

    /// Drop generated columns that are constant on the fit data.
    #[arg(long = "drop-invariant")]
    pub drop_invariant: bool,

    /// How to encode categories not seen during fit.
    #[arg(long = "handle-unknown", value_enum, default_value = "impute")]
    pub handle_unknown: HandleUnknownArg,

    /// Leave unknown and missing categories empty instead of applying
    /// --handle-unknown.
    #[arg(long = "no-impute-missing")]
    pub no_impute_missing: bool,
}

#[derive(Parser)]
pub struct EncodeArgs {
    /// CSV file to fit on and encode.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV path (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also save the fitted encoder as JSON.
    #[arg(long = "save-encoder", value_name = "PATH")]
    pub save_encoder: Option<PathBuf>,

    #[command(flatten)]
    pub encoder: EncoderArgs,
}

#[derive(Parser)]
pub struct FitArgs {
    /// CSV file to fit on.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the fitted encoder.
    #[arg(long = "encoder", value_name = "PATH")]
    pub encoder_path: PathBuf,

    #[command(flatten)]
    pub encoder: EncoderArgs,
}

#[derive(Parser)]
pub struct TransformArgs {
    /// CSV file to encode.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Fitted encoder written by `helmert fit`.
    #[arg(long = "encoder", value_name = "PATH")]
    pub encoder_path: PathBuf,

    /// Output CSV path (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Fitted encoder written by `helmert fit`.
    #[arg(long = "encoder", value_name = "PATH")]
    pub encoder_path: PathBuf,
}

/// Unknown-category policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum HandleUnknownArg {
    Error,
    Ignore,
    Impute,
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
