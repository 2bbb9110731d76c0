//! CLI argument definitions for the lead normalizer.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use lead_cli::server::{DEFAULT_BIND, DEFAULT_MAX_UPLOAD_MB, DEFAULT_UPLOAD_DIR};

#[derive(Parser)]
#[command(
    name = "lead-normalizer",
    version,
    about = "Lead Normalizer - Clean exported sales-lead spreadsheets",
    long_about = "Clean exported sales-lead spreadsheets for CRM import.\n\n\
                  Fills contact defaults, fixes country and state codes, derives\n\
                  lead ratings and marks reassigned leads. Runs once over a file\n\
                  or as an upload server."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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

    /// Allow cell values (personal data) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize one workbook and write the result next to it.
    Process(ProcessArgs),

    /// Run the HTTP upload server.
    Serve(ServeArgs),

    /// List the normalization rules in execution order.
    Rules,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Workbook to normalize (xlsx, xlsm, xlsb, xls or ods).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for the output workbook (default: the input's directory).
    #[arg(long = "output-dir", value_name = "DIR", conflicts_with = "output")]
    pub output_dir: Option<PathBuf>,

    /// Exact output path (default: "lead SW <today>.xlsx" in the output directory).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Normalize and report without writing the output workbook.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long = "bind", value_name = "ADDR", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Directory created at startup for uploads.
    #[arg(long = "upload-dir", value_name = "DIR", default_value = DEFAULT_UPLOAD_DIR)]
    pub upload_dir: PathBuf,

    /// Largest accepted upload, in MiB.
    #[arg(
        long = "max-upload-mb",
        value_name = "N",
        default_value_t = DEFAULT_MAX_UPLOAD_MB,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub max_upload_mb: u64,
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
