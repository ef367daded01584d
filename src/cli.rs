//! CLI argument parsing for perfsum

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "perfsum")]
#[command(version)]
#[command(about = "Duration-weighted summary reports for performance sample logs", long_about = None)]
pub struct Cli {
    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a summary of a performance log file
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Output summary in JSON
    #[arg(long)]
    pub json: bool,

    /// Title of the report (defaults to the log file path)
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Pipe text output through a pager (PAGER is used when no value given)
    #[arg(
        short = 'p',
        long = "pager",
        value_name = "PAGER",
        num_args = 0..=1,
        require_equals = true
    )]
    pub pager: Option<Option<String>>,

    /// Performance log file to summarize
    #[arg(value_name = "LOGFILE")]
    pub logfile: PathBuf,
}
