//! Per-assignment arithmetic
//!
//! A provider's final hour on shift always yields a fixed number of patients,
//! independent of their own rate. Hours before it are counted at the
//! provider's rate.

use crate::types::{ClockTime, Provider};

/// Patients seen in a provider's final (possibly partial) hour
pub const LAST_HOUR_PATIENTS: f64 = 1.8;

/// Hours of a shift window still ahead of the current time.
///
/// A shift that has not started counts its full duration; a finished shift
/// counts zero.
pub fn remaining_hours(
    current_hour: u32,
    current_minute: u32,
    window_start: f64,
    window_end: f64,
) -> f64 {
    let now = ClockTime {
        hour: current_hour,
        minute: current_minute,
    }
    .as_decimal_hours();

    if now < window_start {
        return window_end - window_start;
    }

    if now >= window_end {
        return 0.0;
    }

    (window_end - now).max(0.0)
}

/// Patients a provider will still see in `remaining_hours`
pub fn remaining_patients_for_provider(provider: &Provider, remaining_hours: f64) -> f64 {
    if remaining_hours <= 0.0 {
        return 0.0;
    }

    if remaining_hours < 1.0 {
        return LAST_HOUR_PATIENTS;
    }

    let hours_before_last = remaining_hours - 1.0;
    hours_before_last * provider.patients_per_hour + LAST_HOUR_PATIENTS
}
