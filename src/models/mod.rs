use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use url::Url;

use crate::error::{DebtTrackerError, Result};

/// Debt to the Penny dataset on the Fiscal Data API
pub const DEFAULT_API_BASE_URL: &str =
    "https://api.fiscaldata.treasury.gov/services/api/fiscal_service/v2/accounting/od/debt_to_penny";

pub const DEFAULT_SUMMARY_PATH: &str = "debt_summary.csv";

/// Inclusive date range, `start_date <= end_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        if start_date > end_date {
            return Err(DebtTrackerError::StartAfterEnd {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self { start_date, end_date })
    }

    /// Whole days between the two bounds
    pub fn span_days(&self) -> i64 {
        self.end_date
            .signed_duration_since(self.start_date)
            .num_days()
    }
}

/// One row of the debt_to_penny dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DebtRecord {
    /// Raw value as received; coerced to a date when summarizing
    pub record_date: String,
    pub tot_pub_debt_out_amt: Decimal,
    /// Every other column, untouched
    pub extra: BTreeMap<String, String>,
}

impl DebtRecord {
    pub fn new(record_date: impl Into<String>, tot_pub_debt_out_amt: Decimal) -> Self {
        Self {
            record_date: record_date.into(),
            tot_pub_debt_out_amt,
            extra: BTreeMap::new(),
        }
    }
}

/// Rows accumulated across fetch windows, in arrival order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebtTable {
    pub columns: Vec<String>,
    pub records: Vec<DebtRecord>,
}

impl DebtTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append another table's rows, keeping the column list a union in first-seen order
    pub fn append(&mut self, mut other: DebtTable) {
        for column in other.columns.drain(..) {
            if !self.columns.contains(&column) {
                self.columns.push(column);
            }
        }
        self.records.append(&mut other.records);
    }
}

/// The single row persisted to the summary file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    #[serde(rename = "Starting Date")]
    pub starting_date: NaiveDate,
    #[serde(rename = "Ending Date")]
    pub ending_date: NaiveDate,
    #[serde(rename = "Starting Debt")]
    pub starting_debt: Decimal,
    #[serde(rename = "Ending Debt")]
    pub ending_debt: Decimal,
    #[serde(rename = "Number of Days")]
    pub total_days: i64,
    #[serde(rename = "Total Debt Added")]
    pub total_debt_added: Decimal,
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub summary_path: String,
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default API URL is valid"),
            summary_path: DEFAULT_SUMMARY_PATH.to_string(),
            request_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let api_base_url = std::env::var("DEBT_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        Ok(Config {
            api_base_url: Url::parse(&api_base_url)?,
            summary_path: std::env::var("DEBT_SUMMARY_PATH")
                .unwrap_or_else(|_| DEFAULT_SUMMARY_PATH.to_string()),
            request_timeout: std::env::var("DEBT_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|secs| secs.parse().ok())
                .map(Duration::from_secs),
        })
    }

    pub fn with_base_url(mut self, api_base_url: &str) -> Result<Self> {
        self.api_base_url = Url::parse(api_base_url)?;
        Ok(self)
    }
}
