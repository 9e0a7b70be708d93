//! Utility functions for the staffing calculator

use crate::types::ProviderId;
use chrono::{Local, NaiveDate, Timelike};
use uuid::Uuid;

/// Generate a new unique provider ID
pub fn generate_provider_id() -> ProviderId {
    Uuid::new_v4()
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local wall-clock time as (hour, minute)
pub fn current_hour_minute() -> (u32, u32) {
    let now = Local::now();
    (now.hour(), now.minute())
}

/// Round to a fixed number of decimal places for display
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Format a decimal hour-of-day as HH:MM
pub fn format_hour(hour: f64) -> String {
    let total_minutes = (hour * 60.0).round() as i64;
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}
