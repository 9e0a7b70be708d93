//! Clinic Staffing - remaining-patient calculator for a walk-in clinic
//!
//! This crate models the clinic's three daily shifts, the providers assigned
//! to them, and estimates how many patients can still be seen today given the
//! current time and the lobby count.

pub mod config;
pub mod error;
pub mod estimator;
pub mod input;
pub mod report;
pub mod shift;
pub mod state;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, StaffingError};
pub use types::*;

// Re-export key components
pub use estimator::{estimate, EstimationContext};
pub use input::EstimationRequest;
pub use state::{apply, Command, StateStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
