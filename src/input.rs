//! Parsing of user-entered form values
//!
//! Date and time are required: missing or unparseable values are reported as
//! validation failures and no estimate is computed. Counts and rates are
//! lenient and fall back to zero.

use crate::error::{Result, StaffingError};
use crate::estimator::EstimationContext;
use crate::types::{AppState, ClockTime};
use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(StaffingError::validation("please select a date").into());
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        StaffingError::validation(format!("invalid date '{}', expected YYYY-MM-DD", value))
    })?;

    Ok(date)
}

/// Parse an `HH:MM` time of day
pub fn parse_clock_time(value: &str) -> Result<ClockTime> {
    let value = value.trim();
    if value.is_empty() {
        return Err(StaffingError::validation("please select a current time").into());
    }

    let invalid =
        || StaffingError::validation(format!("invalid time '{}', expected HH:MM", value));

    let (hour, minute) = value.split_once(':').ok_or_else(invalid)?;
    let hour: u32 = hour.trim().parse().map_err(|_| invalid())?;
    let minute: u32 = minute.trim().parse().map_err(|_| invalid())?;

    ClockTime::new(hour, minute)
}

/// Parse the lobby count from its leading digits.
///
/// Trailing text is ignored, so `"12 patients"` is 12 and `"7.9"` is 7.
/// Negative or non-numeric input counts as zero.
pub fn parse_lobby_count(value: &str) -> u32 {
    let value = value.trim_start();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if negative || digits.is_empty() {
        return 0;
    }

    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// Parse a patients-per-hour rate; unparseable, non-finite or negative input is zero
pub fn parse_rate(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(rate) if rate.is_finite() && rate > 0.0 => rate,
        _ => 0.0,
    }
}

/// A validated calculation request from the form layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimationRequest {
    pub selected_date: NaiveDate,
    pub current_time: ClockTime,
    pub patients_in_lobby: u32,
}

impl EstimationRequest {
    /// Validate raw form values.
    ///
    /// A missing lobby count is zero; a missing date or time is an error.
    pub fn parse(date: Option<&str>, time: Option<&str>, lobby: Option<&str>) -> Result<Self> {
        let (date, time) = match (date, time) {
            (Some(date), Some(time)) => (date, time),
            _ => {
                return Err(
                    StaffingError::validation("please select a date and current time").into(),
                )
            }
        };

        Ok(Self {
            selected_date: parse_date(date)?,
            current_time: parse_clock_time(time)?,
            patients_in_lobby: lobby.map(parse_lobby_count).unwrap_or(0),
        })
    }

    /// Bind this request to the application state for estimation
    pub fn context<'a>(&self, state: &'a AppState) -> EstimationContext<'a> {
        EstimationContext::new(
            self.selected_date,
            self.current_time,
            self.patients_in_lobby,
            state,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_reason(err: &anyhow::Error) -> String {
        match err.downcast_ref::<StaffingError>() {
            Some(StaffingError::ValidationFailed { reason }) => reason.clone(),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-06-13").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 13).unwrap()
        );
        assert!(validation_reason(&parse_date("").unwrap_err()).contains("select a date"));
        assert!(parse_date("13/06/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(parse_clock_time("08:05").unwrap(), ClockTime::new(8, 5).unwrap());
        assert_eq!(parse_clock_time(" 17:30 ").unwrap().as_decimal_hours(), 17.5);
        assert!(parse_clock_time("").is_err());
        assert!(parse_clock_time("1730").is_err());
        assert!(parse_clock_time("25:00").is_err());
        assert!(parse_clock_time("ab:cd").is_err());
    }

    #[test]
    fn test_parse_lobby_count_defaults_to_zero() {
        assert_eq!(parse_lobby_count("5"), 5);
        assert_eq!(parse_lobby_count(" 12 "), 12);
        assert_eq!(parse_lobby_count("7.9"), 7);
        assert_eq!(parse_lobby_count("12 patients"), 12);
        assert_eq!(parse_lobby_count("1e3"), 1);
        assert_eq!(parse_lobby_count("+4"), 4);
        assert_eq!(parse_lobby_count("99999999999"), u32::MAX);
        assert_eq!(parse_lobby_count("-3"), 0);
        assert_eq!(parse_lobby_count("lots"), 0);
        assert_eq!(parse_lobby_count(""), 0);
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("4.5"), 4.5);
        assert_eq!(parse_rate("abc"), 0.0);
        assert_eq!(parse_rate("-2"), 0.0);
        assert_eq!(parse_rate("NaN"), 0.0);
        assert_eq!(parse_rate("inf"), 0.0);
    }

    #[test]
    fn test_request_requires_date_and_time() {
        let err = EstimationRequest::parse(None, Some("09:00"), Some("2")).unwrap_err();
        assert!(validation_reason(&err).contains("date and current time"));

        let err = EstimationRequest::parse(Some("2024-06-13"), None, None).unwrap_err();
        assert!(validation_reason(&err).contains("date and current time"));

        let request = EstimationRequest::parse(Some("2024-06-13"), Some("09:00"), None).unwrap();
        assert_eq!(request.patients_in_lobby, 0);
        assert_eq!(request.current_time, ClockTime::new(9, 0).unwrap());
    }
}
