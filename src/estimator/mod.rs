//! Remaining-patient estimation
//!
//! This module turns the current time, the day's shift windows and the
//! assigned providers' rates into a total remaining-patient count with an
//! itemized breakdown.

pub mod calculator;
pub mod estimate;

// Re-export commonly used items
pub use calculator::{remaining_hours, remaining_patients_for_provider, LAST_HOUR_PATIENTS};
pub use estimate::{estimate, EstimationContext};
