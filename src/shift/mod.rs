//! Shift structure for the clinic day
//!
//! This module maps a calendar date to the three shift windows and resolves
//! which providers are working each shift.

pub mod model;
pub mod roster;

// Re-export commonly used items
pub use model::{get_shift_windows, is_special_day, shift_windows_for, SPECIAL_WEEKDAY};
pub use roster::assigned_providers;
