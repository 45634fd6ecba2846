//! Value recognizers for delimited text fields

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::types::ColumnType;

/// Fixed date layout accepted by the date recognizer
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Base-10 integer without a `.` that fits in an `i64`
pub fn is_integer(value: &str) -> bool {
    !value.contains('.') && INTEGER_REGEX.is_match(value) && value.parse::<i64>().is_ok()
}

/// Contains a `.` and parses as a floating point number
pub fn is_real(value: &str) -> bool {
    value.contains('.') && value.parse::<f64>().is_ok()
}

/// Matches `YYYY-MM-DD` exactly and names a real calendar day
pub fn is_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// Parse a date in the fixed layout
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !DATE_REGEX.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Recognize the most specific non-text type of a value
///
/// Checks run in precedence order Integer → Real → Date. Returns `None` for
/// values that only qualify as text.
pub fn recognize(value: &str) -> Option<ColumnType> {
    if is_integer(value) {
        Some(ColumnType::Integer)
    } else if is_real(value) {
        Some(ColumnType::Real)
    } else if is_date(value) {
        Some(ColumnType::Date)
    } else {
        None
    }
}

/// Like [`recognize`] but falls back to [`ColumnType::Text`]
pub fn classify(value: &str) -> ColumnType {
    recognize(value).unwrap_or(ColumnType::Text)
}
