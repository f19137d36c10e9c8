use chrono::{DateTime, NaiveDate, Utc};

/// SP-API timestamps are ISO-8601 in UTC, e.g. `2024-01-05T18:20:19Z`. Returns `None` if the value can't be parsed.
pub fn parse_sp_api_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim()).ok().map(|dt| dt.with_timezone(&Utc))
}

/// `CreatedAfter` accepts either a plain ISO date (`2023-12-31`) or a full ISO-8601 timestamp.
pub fn is_valid_created_after(value: &str) -> bool {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() || parse_sp_api_timestamp(value).is_some()
}
