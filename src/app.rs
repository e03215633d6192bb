//! One end-to-end run: validate the dates, fetch, summarize

use tracing::{debug, info};

use crate::api::TreasuryClient;
use crate::error::{DebtTrackerError, Result};
use crate::fetcher::DebtFetcher;
use crate::models::{Config, DateRange, SummaryRecord};
use crate::summarizer::Summarizer;
use crate::utils::parse_input_date;

/// How a run ended when it did not hit a fatal error
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(SummaryRecord),
    InvalidDateFormat,
    StartAfterEnd,
    NoData,
}

/// Validate the raw date inputs into a range
///
/// Handled input errors are printed and returned as the outcome to stop with.
pub fn validate_inputs(start_input: &str, end_input: &str) -> std::result::Result<DateRange, RunOutcome> {
    let dates = parse_input_date(start_input).and_then(|start| Ok((start, parse_input_date(end_input)?)));
    let (start_date, end_date) = match dates {
        Ok(dates) => dates,
        Err(e) => {
            debug!("{}", e);
            println!("Error: Please enter dates in the format YYYY-MM-DD.");
            return Err(RunOutcome::InvalidDateFormat);
        }
    };

    match DateRange::new(start_date, end_date) {
        Ok(range) => Ok(range),
        Err(e) => {
            debug!("{}", e);
            println!("Error: Starting date must be before ending date.");
            Err(RunOutcome::StartAfterEnd)
        }
    }
}

/// Run the tracker against the configured API
///
/// Nothing touches the network before both dates validate, and the summary
/// file is only written when at least one record came back.
pub async fn run(config: &Config, start_input: &str, end_input: &str) -> Result<RunOutcome> {
    let range = match validate_inputs(start_input, end_input) {
        Ok(range) => range,
        Err(outcome) => return Ok(outcome),
    };

    info!("🚀 Tracking debt from {} to {}", range.start_date, range.end_date);

    let fetcher = DebtFetcher::new(TreasuryClient::new(config)?);
    let mut table = fetcher.fetch(&range).await?;

    if table.is_empty() {
        println!("No data fetched.");
        return Ok(RunOutcome::NoData);
    }

    let summarizer = Summarizer::new(&config.summary_path);
    match summarizer.summarize(&mut table) {
        Ok(summary) => Ok(RunOutcome::Completed(summary)),
        Err(DebtTrackerError::EmptyTable) => {
            println!("No data fetched.");
            Ok(RunOutcome::NoData)
        }
        Err(e) => Err(e),
    }
}
