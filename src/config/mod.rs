//! Configuration management for the clinic-staffing tool
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod app;

// Re-export commonly used types
pub use app::{
    default_data_dir, validate_config, AppConfig, ServiceSettings, StorageBackend,
    StorageSettings,
};
