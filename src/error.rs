//! Error types for the staffing calculator
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

use crate::types::ProviderId;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific staffing scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StaffingError {
    #[error("Validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Provider not found: {provider_id}")]
    ProviderNotFound { provider_id: ProviderId },

    #[error("Provider is submitted and cannot be edited: {provider_id}")]
    ProviderLocked { provider_id: ProviderId },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl StaffingError {
    /// Shorthand for a validation failure
    pub fn validation(reason: impl Into<String>) -> Self {
        StaffingError::ValidationFailed {
            reason: reason.into(),
        }
    }

    /// Whether this error was caused by user input rather than the environment
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            StaffingError::ValidationFailed { .. }
                | StaffingError::ProviderNotFound { .. }
                | StaffingError::ProviderLocked { .. }
        )
    }
}
