pub mod diff;
pub mod list;
pub mod run;
pub mod show;

use chartwatch_core::model::parse_chart_date;
use chrono::NaiveDate;

/// Clap value parser for `YYYY-MM-DD` arguments.
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_chart_date(value).map_err(|e| e.to_string())
}
