//! Normalization of formatted amount and date text
//!
//! Ledger exports carry amounts like `$1,200.00` or `(500.00)` and dates as
//! `MM/DD/YYYY`. Both are converted here before anything reaches the engine.

use chrono::NaiveDate;

use crate::error::{Result, WaterfallError};

/// Date format used by ledger exports
pub const LEDGER_DATE_FORMAT: &str = "%m/%d/%Y";

/// Parse a formatted monetary amount into a signed number
///
/// Currency symbols, whitespace and thousands separators are dropped.
/// A value wrapped in parentheses is negative (accounting notation).
pub fn parse_amount(text: &str) -> Result<f64> {
    let malformed = || WaterfallError::MalformedAmount {
        value: text.to_string(),
    };

    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$' && *c != ',')
        .collect();

    let (digits, negative) = match cleaned
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
    {
        Some(inner) => (inner, true),
        None => (cleaned.as_str(), false),
    };

    if digits.is_empty() {
        return Err(malformed());
    }

    let value: f64 = digits.parse().map_err(|_| malformed())?;
    if !value.is_finite() {
        return Err(malformed());
    }

    Ok(if negative { -value } else { value })
}

/// Parse a ledger date in `MM/DD/YYYY` form
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), LEDGER_DATE_FORMAT).map_err(|_| {
        WaterfallError::MalformedDate {
            value: text.to_string(),
        }
    })
}
