use anyhow::{Context, Result};
use clap::Parser;
use perfsum::cli::{Cli, Command, SummaryArgs};
use perfsum::{accumulate, pager, reader, report, summary};
use std::fs::File;
use std::io::BufReader;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Run the `summary` subcommand end to end
fn run_summary(args: SummaryArgs) -> Result<()> {
    let file = File::open(&args.logfile)
        .with_context(|| format!("failed to open log file: {}", args.logfile.display()))?;
    let records = reader::read_records(BufReader::new(file))
        .with_context(|| format!("failed to read log file: {}", args.logfile.display()))?;
    tracing::debug!("parsed {} records", records.len());

    let duration = match (records.first(), records.last()) {
        (Some(first), Some(last)) if records.len() > 1 => last.time - first.time,
        _ => 0.0,
    };
    let summary = summary::summarize(&records);
    let totals = accumulate::accumulate(&records);

    if args.json {
        let report = report::SummaryReport::new(summary, duration);
        println!("{}", report.to_json()?);
        return Ok(());
    }

    let title = args
        .title
        .unwrap_or_else(|| args.logfile.display().to_string());
    let text = report::render_text(summary.as_ref(), totals.as_ref(), duration, &title);

    match args.pager {
        Some(flag) => {
            let command = pager::resolve_pager(flag)?;
            pager::page_output(&command, &text)?;
        }
        None => print!("{}", text),
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    match args.command {
        Command::Summary(args) => run_summary(args),
    }
}
