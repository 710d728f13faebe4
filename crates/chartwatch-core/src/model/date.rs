use chrono::NaiveDate;

use crate::errors::ChartError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` chart date.
///
/// Only the zero-padded ISO form is accepted so that date keys sort
/// lexically in chronological order.
pub fn parse_chart_date(value: &str) -> Result<NaiveDate, ChartError> {
    let invalid = || ChartError::InvalidDate {
        value: value.to_string(),
    };
    if value.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// Render the storage key for a date (`YYYY-MM-DD`).
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
