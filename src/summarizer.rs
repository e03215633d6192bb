//! Start/end summary of a fetched debt table

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::{DebtTrackerError, Result};
use crate::models::{DebtTable, SummaryRecord};
use crate::utils::{format_currency, parse_record_date};

/// Sort the table by record date and derive the summary from its first and last rows
///
/// Every record_date must parse; one bad value fails the whole call and
/// leaves the table unsorted.
pub fn compute_summary(table: &mut DebtTable) -> Result<SummaryRecord> {
    if table.is_empty() {
        return Err(DebtTrackerError::EmptyTable);
    }

    let dates = table
        .records
        .iter()
        .map(|record| parse_record_date(&record.record_date))
        .collect::<Result<Vec<NaiveDate>>>()?;

    let mut keyed: Vec<_> = dates.into_iter().zip(table.records.drain(..)).collect();
    // stable: equal dates keep arrival order
    keyed.sort_by_key(|(date, _)| *date);

    let (starting_date, ending_date) = match (keyed.first(), keyed.last()) {
        (Some((first, _)), Some((last, _))) => (*first, *last),
        _ => return Err(DebtTrackerError::EmptyTable),
    };
    table.records = keyed.into_iter().map(|(_, record)| record).collect();

    let starting_debt = table.records[0].tot_pub_debt_out_amt;
    let ending_debt = table.records[table.records.len() - 1].tot_pub_debt_out_amt;

    Ok(SummaryRecord {
        starting_date,
        ending_date,
        starting_debt,
        ending_debt,
        total_days: ending_date.signed_duration_since(starting_date).num_days(),
        total_debt_added: ending_debt - starting_debt,
    })
}

/// Human-readable report, one line per field after a blank line and title
pub fn render_report(summary: &SummaryRecord) -> String {
    format!(
        "\nUS Treasury Federal Debt Tracking.\n\
         Starting Date: {}\n\
         Ending Date: {}\n\
         Starting Debt: {}\n\
         Ending Debt: {}\n\
         Number of Days: {}\n\
         Total Debt Added: {}",
        summary.starting_date.format("%Y-%m-%d"),
        summary.ending_date.format("%Y-%m-%d"),
        format_currency(summary.starting_debt),
        format_currency(summary.ending_debt),
        summary.total_days,
        format_currency(summary.total_debt_added),
    )
}

/// Write the summary as a header plus one row, replacing any existing file
pub fn write_summary_csv(summary: &SummaryRecord, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    writer.serialize(summary)?;
    writer.flush()?;
    Ok(())
}

/// Summarizes a table to the console and to the summary file
pub struct Summarizer {
    output_path: PathBuf,
}

impl Summarizer {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    /// Sort, compute, print the report and persist the summary row
    pub fn summarize(&self, table: &mut DebtTable) -> Result<SummaryRecord> {
        let summary = compute_summary(table)?;
        info!(
            "📈 {} records from {} to {}",
            table.len(),
            summary.starting_date,
            summary.ending_date
        );

        println!("{}", render_report(&summary));

        write_summary_csv(&summary, &self.output_path)?;
        info!("💾 Summary written to {}", self.output_path.display());
        println!("\nSummary saved to '{}'.", self.output_path.display());

        Ok(summary)
    }
}
