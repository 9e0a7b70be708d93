//! Common types used throughout the staffing calculator

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for providers
pub type ProviderId = Uuid;

/// A clinician whose throughput counts toward the estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub patients_per_hour: f64,
    /// Lock flag; older documents omit it
    #[serde(default)]
    pub submitted: bool,
}

impl Provider {
    /// Create a blank, editable provider
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            name: String::new(),
            patients_per_hour: 0.0,
            submitted: false,
        }
    }

    /// Builder-style name setter
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder-style rate setter
    pub fn with_rate(mut self, patients_per_hour: f64) -> Self {
        self.patients_per_hour = patients_per_hour;
        self
    }

    /// Builder-style lock
    pub fn locked(mut self) -> Self {
        self.submitted = true;
        self
    }

    pub fn lock_state(&self) -> LockState {
        if self.submitted {
            LockState::Submitted
        } else {
            LockState::Editable
        }
    }
}

/// Whether a provider's name and rate may be edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockState {
    Editable,
    Submitted,
}

impl std::fmt::Display for LockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockState::Editable => write!(f, "editable"),
            LockState::Submitted => write!(f, "submitted"),
        }
    }
}

/// The three fixed daily shifts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKey {
    Opening,
    Mid,
    Close,
}

impl ShiftKey {
    /// Display order used by the estimator and renderer
    pub const ALL: [ShiftKey; 3] = [ShiftKey::Opening, ShiftKey::Mid, ShiftKey::Close];

    /// Storage key ("opening", "mid", "close")
    pub fn key(&self) -> &'static str {
        match self {
            ShiftKey::Opening => "opening",
            ShiftKey::Mid => "mid",
            ShiftKey::Close => "close",
        }
    }

    /// Human-facing shift name
    pub fn display_name(&self) -> &'static str {
        match self {
            ShiftKey::Opening => "Opening",
            ShiftKey::Mid => "Mid",
            ShiftKey::Close => "Close",
        }
    }
}

impl std::fmt::Display for ShiftKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ShiftKey {
    type Err = crate::error::StaffingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opening" => Ok(ShiftKey::Opening),
            "mid" => Ok(ShiftKey::Mid),
            "close" => Ok(ShiftKey::Close),
            other => Err(crate::error::StaffingError::validation(format!(
                "unknown shift '{}', expected opening, mid or close",
                other
            ))),
        }
    }
}

/// Provider ids assigned to each shift, in toggle order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftAssignments {
    #[serde(default)]
    pub opening: Vec<ProviderId>,
    #[serde(default)]
    pub mid: Vec<ProviderId>,
    #[serde(default)]
    pub close: Vec<ProviderId>,
}

impl ShiftAssignments {
    pub fn get(&self, shift: ShiftKey) -> &[ProviderId] {
        match shift {
            ShiftKey::Opening => &self.opening,
            ShiftKey::Mid => &self.mid,
            ShiftKey::Close => &self.close,
        }
    }

    pub fn get_mut(&mut self, shift: ShiftKey) -> &mut Vec<ProviderId> {
        match shift {
            ShiftKey::Opening => &mut self.opening,
            ShiftKey::Mid => &mut self.mid,
            ShiftKey::Close => &mut self.close,
        }
    }

    pub fn contains(&self, shift: ShiftKey, provider_id: &ProviderId) -> bool {
        self.get(shift).contains(provider_id)
    }

    /// Shifts a provider is assigned to, in display order
    pub fn shifts_for(&self, provider_id: &ProviderId) -> Vec<ShiftKey> {
        ShiftKey::ALL
            .into_iter()
            .filter(|shift| self.contains(*shift, provider_id))
            .collect()
    }

    /// Drop a provider from all three shifts
    pub fn remove_everywhere(&mut self, provider_id: &ProviderId) {
        for shift in ShiftKey::ALL {
            self.get_mut(shift).retain(|id| id != provider_id);
        }
    }

    /// Keep only ids accepted by `keep`; returns how many were dropped
    pub fn retain_ids<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&ProviderId) -> bool,
    {
        let mut dropped = 0;
        for shift in ShiftKey::ALL {
            let ids = self.get_mut(shift);
            let before = ids.len();
            ids.retain(|id| keep(id));
            dropped += before - ids.len();
        }
        dropped
    }

    /// Drop repeated ids within each shift, keeping the first occurrence
    pub fn dedupe(&mut self) -> usize {
        let mut dropped = 0;
        for shift in ShiftKey::ALL {
            let ids = self.get_mut(shift);
            let before = ids.len();
            let mut seen = std::collections::HashSet::new();
            ids.retain(|id| seen.insert(*id));
            dropped += before - ids.len();
        }
        dropped
    }

    pub fn total_assignments(&self) -> usize {
        self.opening.len() + self.mid.len() + self.close.len()
    }
}

/// A wall-clock time of day with minute resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    /// Create a clock time, rejecting out-of-range components
    pub fn new(hour: u32, minute: u32) -> crate::error::Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(crate::error::StaffingError::validation(format!(
                "time {:02}:{:02} is out of range",
                hour, minute
            ))
            .into());
        }
        Ok(Self { hour, minute })
    }

    /// Decimal hour-of-day, e.g. 17:30 -> 17.5
    pub fn as_decimal_hours(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Hours of the day a shift covers, as decimal hours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftWindow {
    pub start: f64,
    pub end: f64,
}

impl ShiftWindow {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration_hours(&self) -> f64 {
        self.end - self.start
    }
}

/// One window per shift key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftWindows {
    pub opening: ShiftWindow,
    pub mid: ShiftWindow,
    pub close: ShiftWindow,
}

impl ShiftWindows {
    pub fn get(&self, shift: ShiftKey) -> ShiftWindow {
        match shift {
            ShiftKey::Opening => self.opening,
            ShiftKey::Mid => self.mid,
            ShiftKey::Close => self.close,
        }
    }
}

/// All mutable application data: the providers list and their shift assignments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub providers: Vec<Provider>,
    pub shift_assignments: ShiftAssignments,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider(&self, provider_id: &ProviderId) -> Option<&Provider> {
        self.providers.iter().find(|p| &p.id == provider_id)
    }

    pub fn provider_mut(&mut self, provider_id: &ProviderId) -> Option<&mut Provider> {
        self.providers.iter_mut().find(|p| &p.id == provider_id)
    }

    pub fn has_provider(&self, provider_id: &ProviderId) -> bool {
        self.provider(provider_id).is_some()
    }

    /// Purge assignment ids that no longer reference a provider
    pub fn prune_stale_assignments(&mut self) -> usize {
        let known: std::collections::HashSet<ProviderId> =
            self.providers.iter().map(|p| p.id).collect();
        self.shift_assignments.retain_ids(|id| known.contains(id))
    }

    /// Reset negative or non-finite rates to zero, returning how many changed
    pub fn clamp_invalid_rates(&mut self) -> usize {
        let mut clamped = 0;
        for provider in &mut self.providers {
            if !provider.patients_per_hour.is_finite() || provider.patients_per_hour < 0.0 {
                provider.patients_per_hour = 0.0;
                clamped += 1;
            }
        }
        clamped
    }
}

/// One line of the estimate breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub provider_name: String,
    pub shift_name: String,
    /// Rounded to 2 decimals
    pub remaining_hours: f64,
    /// Rounded to 1 decimal
    pub remaining_patients: f64,
}

/// Output of a single estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub total: u64,
    pub breakdown: Vec<BreakdownItem>,
    pub patients_in_lobby: u32,
    pub is_special_day: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults_missing_submitted_flag() {
        let json = r#"{"id":"00000000-0000-0000-0000-000000000000","name":"Dr. Lee","patientsPerHour":4.5}"#;
        let provider: Provider = serde_json::from_str(json).unwrap();
        assert!(!provider.submitted);
        assert_eq!(provider.lock_state(), LockState::Editable);
        assert_eq!(provider.patients_per_hour, 4.5);
    }

    #[test]
    fn test_shift_key_parsing() {
        assert_eq!("Opening".parse::<ShiftKey>().unwrap(), ShiftKey::Opening);
        assert_eq!(" mid ".parse::<ShiftKey>().unwrap(), ShiftKey::Mid);
        assert_eq!("CLOSE".parse::<ShiftKey>().unwrap(), ShiftKey::Close);
        assert!("night".parse::<ShiftKey>().is_err());
    }

    #[test]
    fn test_shift_assignments_serialized_keys() {
        let id = Uuid::new_v4();
        let assignments = ShiftAssignments {
            opening: vec![id],
            ..Default::default()
        };
        let value = serde_json::to_value(&assignments).unwrap();
        assert_eq!(value["opening"][0], id.to_string());
        assert!(value["mid"].as_array().unwrap().is_empty());
        assert!(value["close"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_clock_time_bounds() {
        assert_eq!(ClockTime::new(17, 30).unwrap().as_decimal_hours(), 17.5);
        assert_eq!(ClockTime::new(0, 0).unwrap().to_string(), "00:00");
        assert!(ClockTime::new(24, 0).is_err());
        assert!(ClockTime::new(12, 60).is_err());
    }

    #[test]
    fn test_remove_everywhere() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut assignments = ShiftAssignments {
            opening: vec![a, b],
            mid: vec![a],
            close: vec![b, a],
        };

        assignments.remove_everywhere(&a);

        assert_eq!(assignments.opening, vec![b]);
        assert!(assignments.mid.is_empty());
        assert_eq!(assignments.close, vec![b]);
        assert_eq!(assignments.shifts_for(&b), vec![ShiftKey::Opening, ShiftKey::Close]);
    }

    #[test]
    fn test_prune_stale_assignments() {
        let kept = Provider::new(Uuid::new_v4()).with_name("Kept");
        let stale = Uuid::new_v4();
        let mut state = AppState {
            providers: vec![kept.clone()],
            shift_assignments: ShiftAssignments {
                opening: vec![stale, kept.id],
                mid: vec![stale],
                close: vec![],
            },
        };

        assert_eq!(state.prune_stale_assignments(), 2);
        assert_eq!(state.shift_assignments.opening, vec![kept.id]);
        assert!(state.shift_assignments.mid.is_empty());
    }
}
