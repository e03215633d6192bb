use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{DebtTrackerError, Result};

/// Parse a user-entered date in strict YYYY-MM-DD form
pub fn parse_input_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| DebtTrackerError::InvalidDateFormat {
        input: trimmed.to_string(),
    })
}

/// Coerce a record_date cell to a calendar date, dropping any time component
pub fn parse_record_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .map_err(|_| DebtTrackerError::InvalidRecordDate {
            value: value.to_string(),
        })
}

/// Dollar amount with thousands separators and two decimals, e.g. `$1,234.50`
///
/// Negative values keep the sign after the dollar symbol: `$-1,234.50`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.2}", rounded);
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("${}{}.{}", sign, grouped, cents)
}
