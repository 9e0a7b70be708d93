//! Resolution of shift assignments to provider records

use crate::types::{AppState, Provider, ShiftKey};
use tracing::debug;

/// Providers assigned to `shift`, in assignment order.
///
/// Ids that no longer reference a provider are skipped.
pub fn assigned_providers(state: &AppState, shift: ShiftKey) -> Vec<&Provider> {
    state
        .shift_assignments
        .get(shift)
        .iter()
        .filter_map(|id| {
            let provider = state.provider(id);
            if provider.is_none() {
                debug!("Skipping stale {} assignment for provider {}", shift.key(), id);
            }
            provider
        })
        .collect()
}
