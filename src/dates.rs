//! Publication-date normalization.
//!
//! The target site prints publication dates as `DD.MM.YYYY` and nothing
//! else; anything that deviates from that exact shape is rejected rather
//! than guessed at.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("date pattern is valid"));

/// A date string did not match `DD.MM.YYYY` or named an impossible date.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("date '{0}' does not match DD.MM.YYYY")]
pub struct DateParseError(pub String);

/// Parse a `DD.MM.YYYY` date string into a calendar date.
///
/// The shape is strict: two-digit day, two-digit month, four-digit year,
/// literal dot separators. There is no fallback date.
pub fn unify_date_format(raw: &str) -> Result<NaiveDate, DateParseError> {
    if !DATE_SHAPE.is_match(raw) {
        return Err(DateParseError(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%d.%m.%Y").map_err(|_| DateParseError(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_dates() {
        assert_eq!(
            unify_date_format("05.03.2021"),
            Ok(NaiveDate::from_ymd_opt(2021, 3, 5).unwrap())
        );
        assert_eq!(
            unify_date_format("31.12.1999"),
            Ok(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap())
        );
    }

    #[test]
    fn rejects_other_shapes() {
        for bad in ["2021-03-05", "5.3.2021", "05/03/2021", "", "yesterday", "05.03.21"] {
            assert_eq!(unify_date_format(bad), Err(DateParseError(bad.to_string())));
        }
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        for bad in ["32.01.2021", "29.02.2021", "00.05.2021", "15.13.2021"] {
            assert_eq!(unify_date_format(bad), Err(DateParseError(bad.to_string())));
        }
    }
}
