//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! clinic-staffing tool, including environment variable and TOML file loading
//! and validation.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub storage: StorageSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name shown in logs
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Where providers and shift assignments are kept between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON documents under `data_dir`
    File,
    /// Nothing survives the process
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("Invalid storage backend: {}", other)),
        }
    }
}

/// Persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Directory holding the slot documents
    pub data_dir: PathBuf,
    /// Slot name for the providers list
    pub providers_slot: String,
    /// Slot name for the shift assignments
    pub assignments_slot: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "clinic-staffing".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: default_data_dir(),
            providers_slot: "chcProviders".to_string(),
            assignments_slot: "chcShiftAssignments".to_string(),
        }
    }
}

/// Platform data directory for the tool, falling back to the working directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("clinic-staffing"))
        .unwrap_or_else(|| PathBuf::from(".clinic-staffing"))
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Storage settings
        if let Ok(backend) = env::var("STORAGE_BACKEND") {
            self.storage.backend = backend
                .parse()
                .map_err(|_| anyhow!("Invalid STORAGE_BACKEND value: {}", backend))?;
        }
        if let Ok(data_dir) = env::var("DATA_DIR") {
            self.storage.data_dir = PathBuf::from(data_dir);
        }
        if let Ok(slot) = env::var("PROVIDERS_SLOT") {
            self.storage.providers_slot = slot;
        }
        if let Ok(slot) = env::var("ASSIGNMENTS_SLOT") {
            self.storage.assignments_slot = slot;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate storage settings
    if config.storage.backend == StorageBackend::File
        && config.storage.data_dir.as_os_str().is_empty()
    {
        return Err(anyhow!("Data directory cannot be empty"));
    }
    for slot in [
        &config.storage.providers_slot,
        &config.storage.assignments_slot,
    ] {
        if slot.trim().is_empty() {
            return Err(anyhow!("Storage slot names cannot be empty"));
        }
        if slot.contains(['/', '\\']) {
            return Err(anyhow!("Storage slot name cannot contain a path separator: {}", slot));
        }
    }
    if config.storage.providers_slot == config.storage.assignments_slot {
        return Err(anyhow!("Providers and assignments slots must differ"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.storage.providers_slot, "chcProviders");
        assert_eq!(config.storage.assignments_slot, "chcShiftAssignments");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.storage.providers_slot = "  ".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.storage.assignments_slot = "../escape".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.storage.assignments_slot = config.storage.providers_slot.clone();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!("File".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("redis".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_partial_toml_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[service]
log_level = "debug"

[storage]
backend = "memory"
providers_slot = "providers"
"#
        )
        .unwrap();

        let config: AppConfig =
            toml::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.service.name, "clinic-staffing");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.providers_slot, "providers");
        assert_eq!(config.storage.assignments_slot, "chcShiftAssignments");
        assert!(validate_config(&config).is_ok());
    }
}
