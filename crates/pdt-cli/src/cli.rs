//! CLI argument definitions for the `pdt` tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use pdt_model::parse_display;

#[derive(Parser)]
#[command(
    name = "pdt",
    version,
    about = "Shooting schedule analysis - count shooting days and sequences",
    long_about = "Read a shooting schedule (PDT) and report its shooting days,\n\
                  sequences and period.\n\n\
                  Accepts plain text, positioned PDF text fragments (JSON) and\n\
                  spreadsheets (CSV), either free-form or in the standard matrix layout."
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

    /// Allow document text in trace-level logs.
    #[arg(long = "log-text", global = true)]
    pub log_text: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyse a schedule document.
    Analyze(AnalyzeArgs),

    /// Write a blank matrix spreadsheet.
    Template(TemplateArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Schedule document (.txt, .json fragments or .csv).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Year assumed when the document never names one (default: current year).
    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<i32>,

    /// Saved AI pre-pass response (JSON) to try before the regex engine.
    #[arg(long = "ai-result", value_name = "PATH")]
    pub ai_result: Option<PathBuf>,

    /// Count Saturdays and Sundays found in calendar grids.
    #[arg(long = "keep-grid-weekends")]
    pub keep_grid_weekends: bool,

    /// Print the analysis as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Print every accepted and rejected candidate.
    #[arg(long = "trace")]
    pub trace: bool,
}

#[derive(Parser)]
pub struct TemplateArgs {
    /// First day of the template (DD/MM/YYYY or YYYY-MM-DD).
    #[arg(long = "start", value_name = "DATE", value_parser = parse_date_arg, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Last day of the template, inclusive.
    #[arg(long = "end", value_name = "DATE", value_parser = parse_date_arg, requires = "start")]
    pub end: Option<NaiveDate>,

    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Accepts the display format or ISO dates.
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_display(value)
        .or_else(|| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
        .ok_or_else(|| format!("invalid date '{value}', expected DD/MM/YYYY or YYYY-MM-DD"))
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
