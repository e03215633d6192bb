use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use debt_tracker::app::{self, RunOutcome};
use debt_tracker::models::Config;

/// US Treasury public debt tracker
#[derive(Parser)]
#[command(name = "debt-tracker")]
#[command(version = "0.1.0")]
#[command(about = "Summarize US Treasury 'Debt to the Penny' figures over a date range")]
#[command(long_about = "
Fetches total public debt outstanding from the Fiscal Data API for every record
date between the start and end dates, prints the starting and ending debt, the
number of days and the debt added, and saves the same figures to a CSV file.

Dates not given on the command line are prompted for.

Examples:
  debt-tracker -s 2021-01-01 -e 2021-12-31
  debt-tracker --start-date 2020-03-01 --end-date 2020-06-30 -o covid_debt.csv
")]
struct Args {
    /// Start date (YYYY-MM-DD)
    #[arg(long, short = 's')]
    start_date: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long, short = 'e')]
    end_date: Option<String>,

    /// Summary CSV path (defaults to DEBT_SUMMARY_PATH or debt_summary.csv)
    #[arg(long, short = 'o')]
    output: Option<String>,
}

/// Prompt for one line of input
fn prompt_line(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the report on stdout stays clean
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debt_tracker=warn")),
        )
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let args = Args::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(output) = args.output {
        config.summary_path = output;
    }

    let start_input = match args.start_date {
        Some(date) => date,
        None => prompt_line("Enter the starting date (YYYY-MM-DD): ")?,
    };
    let end_input = match args.end_date {
        Some(date) => date,
        None => prompt_line("Enter the ending date (YYYY-MM-DD): ")?,
    };

    let outcome = app::run(&config, &start_input, &end_input)
        .await
        .map_err(|e| {
            error!("Debt tracking failed: {}", e);
            e
        })
        .context("Debt tracking failed")?;

    if !matches!(outcome, RunOutcome::Completed(_)) {
        tracing::debug!("Run stopped early: {:?}", outcome);
    }
    Ok(())
}
