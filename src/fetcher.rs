//! Windowed fetching of debt_to_penny records
//!
//! The requested range is split into consecutive 101-day windows (start day
//! plus 100) and each window is requested in order, one at a time. Failed
//! windows are reported and skipped; the rows of every successful window are
//! concatenated in fetch order.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::api::DebtDataProvider;
use crate::error::{DebtTrackerError, Result};
use crate::models::{DateRange, DebtRecord, DebtTable};

/// Days added to a window's start to get its end
pub const WINDOW_DAYS: u64 = 100;

pub const RECORD_DATE_COLUMN: &str = "record_date";
pub const DEBT_AMOUNT_COLUMN: &str = "tot_pub_debt_out_amt";

/// Split a range into non-overlapping windows covering it exactly
pub fn plan_windows(range: &DateRange) -> Vec<DateRange> {
    let mut windows = Vec::new();
    let mut current_start = range.start_date;

    loop {
        let current_end = current_start
            .checked_add_days(Days::new(WINDOW_DAYS))
            .unwrap_or(NaiveDate::MAX)
            .min(range.end_date);

        windows.push(DateRange {
            start_date: current_start,
            end_date: current_end,
        });

        match current_end.succ_opt() {
            Some(next) if next <= range.end_date => current_start = next,
            _ => break,
        }
    }

    windows
}

/// Parse one CSV response body into a table
pub fn parse_debt_csv(body: &str) -> Result<DebtTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    let column_index = |name: &str| {
        columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DebtTrackerError::MissingColumn(name.to_string()))
    };
    let date_idx = column_index(RECORD_DATE_COLUMN)?;
    let amount_idx = column_index(DEBT_AMOUNT_COLUMN)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let raw_amount = row.get(amount_idx).unwrap_or_default();
        let tot_pub_debt_out_amt = Decimal::from_str(raw_amount)
            .or_else(|_| Decimal::from_scientific(raw_amount))
            .map_err(|_| DebtTrackerError::InvalidAmount {
                column: DEBT_AMOUNT_COLUMN.to_string(),
                value: raw_amount.to_string(),
            })?;

        let extra: BTreeMap<String, String> = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_idx && *i != amount_idx)
            .filter_map(|(i, name)| row.get(i).map(|v| (name.clone(), v.to_string())))
            .collect();

        records.push(DebtRecord {
            record_date: row.get(date_idx).unwrap_or_default().to_string(),
            tot_pub_debt_out_amt,
            extra,
        });
    }

    Ok(DebtTable { columns, records })
}

/// Sequential window-by-window fetcher over any data provider
pub struct DebtFetcher<P> {
    provider: P,
}

impl<P: DebtDataProvider> DebtFetcher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Fetch every window of `range` and concatenate the successful ones
    ///
    /// Non-200 responses and transport failures are printed and skipped. A
    /// malformed CSV body in a successful response is fatal.
    pub async fn fetch(&self, range: &DateRange) -> Result<DebtTable> {
        let windows = plan_windows(range);
        info!(
            "📅 Fetching {} to {} ({} days) in {} window(s)",
            range.start_date,
            range.end_date,
            range.span_days(),
            windows.len()
        );

        let mut table = DebtTable::new();
        let mut failed_windows = 0;

        for window in &windows {
            let start_str = window.start_date.format("%Y-%m-%d");
            let end_str = window.end_date.format("%Y-%m-%d");
            println!("Fetching data from {} to {}", start_str, end_str);

            match self.provider.fetch_window(window).await {
                Ok(response) if response.is_ok() => {
                    let page = parse_debt_csv(&response.body)?;
                    debug!("Window {} to {}: {} records", start_str, end_str, page.len());
                    table.append(page);
                }
                Ok(response) => {
                    failed_windows += 1;
                    println!(
                        "Failed to fetch data for {} to {}: {}",
                        start_str, end_str, response.status
                    );
                    debug!("⚠️ Window {} to {} returned status {}", start_str, end_str, response.status);
                }
                Err(e) => {
                    failed_windows += 1;
                    println!("Failed to fetch data for {} to {}: {}", start_str, end_str, e);
                    debug!("⚠️ Window {} to {} failed: {}", start_str, end_str, e);
                }
            }
        }

        info!(
            "📊 Fetched {} records ({} of {} windows failed)",
            table.len(),
            failed_windows,
            windows.len()
        );
        Ok(table)
    }
}
