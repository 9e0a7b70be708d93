//! State storage interface and implementations
//!
//! This module defines the interface for persisting and restoring the
//! application state, with in-memory, JSON file and recording mock backends.
//! The state is kept in two named slots: the providers list and the shift
//! assignments.

use crate::config::{StorageBackend, StorageSettings};
use crate::error::StaffingError;
use crate::types::{AppState, Provider, ShiftAssignments};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Trait for state storage operations
pub trait StateStore: Send + Sync {
    /// Load the saved state, or an empty state when nothing was saved
    fn load(&self) -> crate::error::Result<AppState>;

    /// Replace the saved state
    fn save(&self, state: &AppState) -> crate::error::Result<()>;
}

/// Build the store selected by the storage settings
pub fn open_store(settings: &StorageSettings) -> Arc<dyn StateStore> {
    match settings.backend {
        StorageBackend::Memory => Arc::new(InMemoryStateStore::new()),
        StorageBackend::File => Arc::new(JsonFileStateStore::from_settings(settings)),
    }
}

/// Repair loaded state: stale or repeated assignment ids are dropped and
/// invalid rates reset to zero, logging what was changed
fn heal_loaded_state(mut state: AppState) -> AppState {
    let purged = state.prune_stale_assignments();
    if purged > 0 {
        warn!("Purged {} stale shift assignments while loading state", purged);
    }

    let duplicates = state.shift_assignments.dedupe();
    if duplicates > 0 {
        warn!("Purged {} duplicate shift assignments while loading state", duplicates);
    }

    let clamped = state.clamp_invalid_rates();
    if clamped > 0 {
        warn!("Reset {} invalid provider rates to 0 while loading state", clamped);
    }

    state
}

/// In-memory state storage implementation
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    state: RwLock<AppState>,
}

impl InMemoryStateStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `state`
    pub fn with_state(state: AppState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }
}

impl StateStore for InMemoryStateStore {
    fn load(&self) -> crate::error::Result<AppState> {
        let state = self
            .state
            .read()
            .map_err(|_| StaffingError::StorageError {
                message: "Failed to acquire state read lock".to_string(),
            })?;

        Ok(heal_loaded_state(state.clone()))
    }

    fn save(&self, state: &AppState) -> crate::error::Result<()> {
        let mut stored = self
            .state
            .write()
            .map_err(|_| StaffingError::StorageError {
                message: "Failed to acquire state write lock".to_string(),
            })?;

        *stored = state.clone();
        Ok(())
    }
}

/// JSON file storage, one document per slot under a data directory
#[derive(Debug, Clone)]
pub struct JsonFileStateStore {
    data_dir: PathBuf,
    providers_slot: String,
    assignments_slot: String,
}

impl JsonFileStateStore {
    /// Create a file store with explicit slot names
    pub fn new(
        data_dir: impl Into<PathBuf>,
        providers_slot: impl Into<String>,
        assignments_slot: impl Into<String>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            providers_slot: providers_slot.into(),
            assignments_slot: assignments_slot.into(),
        }
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(
            &settings.data_dir,
            &settings.providers_slot,
            &settings.assignments_slot,
        )
    }

    pub fn providers_path(&self) -> PathBuf {
        self.slot_path(&self.providers_slot)
    }

    pub fn assignments_path(&self) -> PathBuf {
        self.slot_path(&self.assignments_slot)
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", slot))
    }

    /// Read one slot; a missing file yields `None`
    fn read_slot<T: DeserializeOwned>(path: &Path) -> crate::error::Result<Option<T>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved slot at {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(StaffingError::StorageError {
                    message: format!("Failed to read {}: {}", path.display(), e),
                }
                .into())
            }
        };

        let value = serde_json::from_str(&contents).map_err(|e| StaffingError::StorageError {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })?;

        Ok(Some(value))
    }

    fn write_slot<T: Serialize>(path: &Path, value: &T) -> crate::error::Result<()> {
        let contents =
            serde_json::to_string_pretty(value).map_err(|e| StaffingError::StorageError {
                message: format!("Failed to serialize {}: {}", path.display(), e),
            })?;

        fs::write(path, contents).map_err(|e| StaffingError::StorageError {
            message: format!("Failed to write {}: {}", path.display(), e),
        })?;

        Ok(())
    }
}

impl StateStore for JsonFileStateStore {
    fn load(&self) -> crate::error::Result<AppState> {
        let providers: Vec<Provider> =
            Self::read_slot(&self.providers_path())?.unwrap_or_default();
        let shift_assignments: ShiftAssignments =
            Self::read_slot(&self.assignments_path())?.unwrap_or_default();

        debug!(
            "Loaded {} providers and {} shift assignments from {}",
            providers.len(),
            shift_assignments.total_assignments(),
            self.data_dir.display()
        );

        Ok(heal_loaded_state(AppState {
            providers,
            shift_assignments,
        }))
    }

    fn save(&self, state: &AppState) -> crate::error::Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| StaffingError::StorageError {
            message: format!(
                "Failed to create data directory {}: {}",
                self.data_dir.display(),
                e
            ),
        })?;

        Self::write_slot(&self.providers_path(), &state.providers)?;
        Self::write_slot(&self.assignments_path(), &state.shift_assignments)?;

        debug!("Saved state to {}", self.data_dir.display());
        Ok(())
    }
}

/// Mock state storage for testing
#[derive(Debug, Default)]
pub struct MockStateStore {
    state: RwLock<AppState>,
    save_calls: RwLock<Vec<AppState>>,
}

impl MockStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all saved states, oldest first (for testing)
    pub fn get_save_calls(&self) -> Vec<AppState> {
        self.save_calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Clear save calls (for testing)
    pub fn clear_save_calls(&self) {
        if let Ok(mut calls) = self.save_calls.write() {
            calls.clear();
        }
    }

    /// Preset the state returned by `load` (for testing)
    pub fn preset_state(&self, state: AppState) -> crate::error::Result<()> {
        let mut stored = self
            .state
            .write()
            .map_err(|_| StaffingError::StorageError {
                message: "Failed to acquire state write lock".to_string(),
            })?;

        *stored = state;
        Ok(())
    }
}

impl StateStore for MockStateStore {
    fn load(&self) -> crate::error::Result<AppState> {
        let state = self
            .state
            .read()
            .map_err(|_| StaffingError::StorageError {
                message: "Failed to acquire state read lock".to_string(),
            })?;

        Ok(heal_loaded_state(state.clone()))
    }

    fn save(&self, state: &AppState) -> crate::error::Result<()> {
        // Record the call for testing
        if let Ok(mut calls) = self.save_calls.write() {
            calls.push(state.clone());
        }

        let mut stored = self
            .state
            .write()
            .map_err(|_| StaffingError::StorageError {
                message: "Failed to acquire state write lock".to_string(),
            })?;

        *stored = state.clone();
        Ok(())
    }
}
