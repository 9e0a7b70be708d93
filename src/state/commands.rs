//! Command dispatch for user actions
//!
//! Every action is a pure transition from the current state to a new one.
//! A rejected action returns an error and leaves the caller's state untouched.

use crate::error::{Result, StaffingError};
use crate::input::parse_rate;
use crate::types::{AppState, Provider, ProviderId, ShiftKey};
use crate::utils::generate_provider_id;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A single user action against the application state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    AddProvider { id: ProviderId },
    SetName { id: ProviderId, value: String },
    SetRate { id: ProviderId, value: String },
    Submit { id: ProviderId },
    Unlock { id: ProviderId },
    Delete { id: ProviderId },
    ToggleAssignment { shift: ShiftKey, id: ProviderId },
}

impl Command {
    /// Add a blank provider under a freshly generated id
    pub fn add_provider() -> Self {
        Command::AddProvider {
            id: generate_provider_id(),
        }
    }

    /// The provider this command targets
    pub fn provider_id(&self) -> ProviderId {
        match self {
            Command::AddProvider { id }
            | Command::SetName { id, .. }
            | Command::SetRate { id, .. }
            | Command::Submit { id }
            | Command::Unlock { id }
            | Command::Delete { id }
            | Command::ToggleAssignment { id, .. } => *id,
        }
    }
}

/// Apply `command` to `state`, producing the next state
pub fn apply(state: &AppState, command: Command) -> Result<AppState> {
    match command {
        Command::AddProvider { id } => add_provider(state, id),
        Command::SetName { id, value } => set_name(state, id, &value),
        Command::SetRate { id, value } => set_rate(state, id, &value),
        Command::Submit { id } => submit(state, id),
        Command::Unlock { id } => unlock(state, id),
        Command::Delete { id } => delete(state, id),
        Command::ToggleAssignment { shift, id } => toggle_assignment(state, shift, id),
    }
}

/// Insert a blank, editable provider at the top of the list
pub fn add_provider(state: &AppState, id: ProviderId) -> Result<AppState> {
    if state.has_provider(&id) {
        return Err(StaffingError::validation(format!("provider {} already exists", id)).into());
    }

    let mut next = state.clone();
    next.providers.insert(0, Provider::new(id));

    info!("Added provider {}", id);
    Ok(next)
}

/// Set an editable provider's name; surrounding whitespace is dropped
pub fn set_name(state: &AppState, id: ProviderId, value: &str) -> Result<AppState> {
    let mut next = state.clone();
    let provider = editable_provider(&mut next, id)?;
    provider.name = value.trim().to_string();

    info!("Renamed provider {} to '{}'", id, provider.name);
    Ok(next)
}

/// Set an editable provider's rate; unparseable input becomes zero
pub fn set_rate(state: &AppState, id: ProviderId, value: &str) -> Result<AppState> {
    let mut next = state.clone();
    let provider = editable_provider(&mut next, id)?;
    provider.patients_per_hour = parse_rate(value);

    info!(
        "Set rate for provider {} to {} patients/hour",
        id, provider.patients_per_hour
    );
    Ok(next)
}

/// Lock a provider once it has a name and a positive rate
pub fn submit(state: &AppState, id: ProviderId) -> Result<AppState> {
    let mut next = state.clone();
    let provider = next
        .provider_mut(&id)
        .ok_or(StaffingError::ProviderNotFound { provider_id: id })?;

    if provider.name.trim().is_empty() || provider.patients_per_hour <= 0.0 {
        return Err(StaffingError::validation(
            "please enter a valid provider name and patients per hour before submitting",
        )
        .into());
    }

    provider.submitted = true;

    info!("Submitted provider {} ('{}')", id, provider.name);
    Ok(next)
}

/// Unlock a provider for editing
pub fn unlock(state: &AppState, id: ProviderId) -> Result<AppState> {
    let mut next = state.clone();
    let provider = next
        .provider_mut(&id)
        .ok_or(StaffingError::ProviderNotFound { provider_id: id })?;
    provider.submitted = false;

    info!("Unlocked provider {} ('{}')", id, provider.name);
    Ok(next)
}

/// Remove a provider and all of its shift assignments
pub fn delete(state: &AppState, id: ProviderId) -> Result<AppState> {
    if !state.has_provider(&id) {
        return Err(StaffingError::ProviderNotFound { provider_id: id }.into());
    }

    let mut next = state.clone();
    next.providers.retain(|p| p.id != id);
    next.shift_assignments.remove_everywhere(&id);

    info!("Deleted provider {}", id);
    Ok(next)
}

/// Assign a provider to a shift, or remove them if already assigned
pub fn toggle_assignment(state: &AppState, shift: ShiftKey, id: ProviderId) -> Result<AppState> {
    if !state.has_provider(&id) {
        return Err(StaffingError::ProviderNotFound { provider_id: id }.into());
    }

    let mut next = state.clone();
    let assigned = next.shift_assignments.get_mut(shift);

    if let Some(index) = assigned.iter().position(|pid| *pid == id) {
        assigned.remove(index);
        info!("Removed provider {} from {} shift", id, shift.key());
    } else {
        assigned.push(id);
        info!("Assigned provider {} to {} shift", id, shift.key());
    }

    Ok(next)
}

fn editable_provider(state: &mut AppState, id: ProviderId) -> Result<&mut Provider> {
    let provider = state
        .provider_mut(&id)
        .ok_or(StaffingError::ProviderNotFound { provider_id: id })?;

    if provider.submitted {
        return Err(StaffingError::ProviderLocked { provider_id: id }.into());
    }

    Ok(provider)
}
