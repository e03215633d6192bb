use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebtTrackerError {
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDateFormat { input: String },

    #[error("Start date ({start}) is after end date ({end})")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },

    #[error("Cannot summarize an empty debt table")]
    EmptyTable,

    #[error("Response is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Unparseable record_date '{value}'")]
    InvalidRecordDate { value: String },

    #[error("Unparseable amount '{value}' in column '{column}'")]
    InvalidAmount { column: String, value: String },

    #[error("Invalid API base URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DebtTrackerError>;
