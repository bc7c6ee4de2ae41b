//! Day-granularity normalization for DATE / TIMESTAMP comparisons.

use crate::filter::FilterOperator;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const START_OF_DAY: &str = "00:00:00";
const END_OF_DAY: &str = "23:59:59";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a loosely formatted date or date-time and reduce it to its calendar day.
///
/// Offsets (RFC 3339) are converted to UTC first.
pub fn parse_day(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

/// Normalize `input` to `YYYY-MM-DD`, then extend it to the start of the day
/// for `>` / `>=` and the end of the day for `<` / `<=`.
///
/// Returns `None` when the input is not a recognizable date.
pub fn coerce_for_comparison(op: FilterOperator, input: &str) -> Option<String> {
    let day = parse_day(input)?.format("%Y-%m-%d");
    Some(match op {
        FilterOperator::Gt | FilterOperator::Gte => format!("{day} {START_OF_DAY}"),
        FilterOperator::Lt | FilterOperator::Lte => format!("{day} {END_OF_DAY}"),
        _ => day.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_date() {
        assert_eq!(
            parse_day("2024-01-01"),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn parse_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(parse_day("2024-03-09 14:30:00"), expected);
        assert_eq!(parse_day("2024-03-09T14:30:00"), expected);
        assert_eq!(parse_day("2024/03/09"), expected);
        assert_eq!(parse_day("03/09/2024"), expected);
        assert_eq!(parse_day("09-MAR-2024"), expected);
        assert_eq!(parse_day(" 2024-03-09 "), expected);
    }

    #[test]
    fn rfc3339_is_reduced_in_utc() {
        assert_eq!(
            parse_day("2024-03-09T23:30:00-02:00"),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_day("yesterday-ish"), None);
        assert_eq!(parse_day(""), None);
        assert_eq!(parse_day("2024-13-40"), None);
    }

    #[test]
    fn comparison_extends_to_day_bounds() {
        assert_eq!(
            coerce_for_comparison(FilterOperator::Gte, "2024-01-01").as_deref(),
            Some("2024-01-01 00:00:00")
        );
        assert_eq!(
            coerce_for_comparison(FilterOperator::Gt, "2024-01-01 18:00:00").as_deref(),
            Some("2024-01-01 00:00:00")
        );
        assert_eq!(
            coerce_for_comparison(FilterOperator::Lte, "2024-01-01").as_deref(),
            Some("2024-01-01 23:59:59")
        );
        assert_eq!(
            coerce_for_comparison(FilterOperator::Lt, "01/31/2024").as_deref(),
            Some("2024-01-31 23:59:59")
        );
    }
}
