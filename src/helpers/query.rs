//! Parsing of the raw credit card query parameters.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use compute::SummaryFilter;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid cycle_date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid id '{value}' in {field}, expected a comma-separated list of integers")]
    InvalidId { field: &'static str, value: String },

    #[error("malformed request: {0}")]
    Malformed(String),
}

/// The reference instant of a request: midnight UTC of `cycle_date`, or now.
pub fn parse_cycle_date(raw: Option<&str>) -> Result<DateTime<Utc>, QueryError> {
    match raw.filter(|raw| !raw.is_empty()) {
        None => Ok(Utc::now()),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
            .map_err(|_| QueryError::InvalidDate(raw.to_string())),
    }
}

/// Parses `1,2,3`. Blank entries are ignored.
pub fn parse_id_list(field: &'static str, raw: Option<&str>) -> Result<Vec<i32>, QueryError> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value.parse::<i32>().map_err(|_| QueryError::InvalidId {
                field,
                value: value.to_string(),
            })
        })
        .collect()
}

/// Builds the summary filter; `None` when neither list restricts anything.
pub fn parse_filter(card_ids: Option<&str>, owner_ids: Option<&str>) -> Result<Option<SummaryFilter>, QueryError> {
    let filter = SummaryFilter {
        card_ids: parse_id_list("card_ids", card_ids)?,
        owner_ids: parse_id_list("owner_ids", owner_ids)?,
    };

    Ok((!filter.is_empty()).then_some(filter))
}
