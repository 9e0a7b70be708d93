//! Plain-text rendering of estimates, schedules and the provider list

use crate::types::{AppState, EstimationResult, ShiftKey, ShiftWindows};
use crate::utils::format_hour;

/// Shown when no assignment contributes to the estimate
pub const EMPTY_BREAKDOWN_MESSAGE: &str = "No providers assigned or all shifts completed.";

/// Shown when the special-day schedule is in effect
pub const SPECIAL_DAY_NOTICE: &str = "Thursday schedule: all shifts run 09:00-19:00.";

/// Render an estimate as display lines
pub fn render_estimate(result: &EstimationResult) -> String {
    let mut lines = vec![format!("Remaining patients: {}", result.total)];

    if result.is_special_day {
        lines.push(SPECIAL_DAY_NOTICE.to_string());
    }

    if result.breakdown.is_empty() {
        lines.push(EMPTY_BREAKDOWN_MESSAGE.to_string());
    } else {
        lines.push("Breakdown:".to_string());
        lines.push(format!("  Lobby: {} patients", result.patients_in_lobby));
        for item in &result.breakdown {
            lines.push(format!(
                "  {} ({}): {:.1} patients ({:.2} hrs remaining)",
                item.provider_name, item.shift_name, item.remaining_patients, item.remaining_hours
            ));
        }
    }

    lines.join("\n")
}

/// Render the three shift windows for a day type
pub fn render_schedule(windows: &ShiftWindows, is_special_day: bool) -> String {
    let mut lines = Vec::new();
    if is_special_day {
        lines.push(SPECIAL_DAY_NOTICE.to_string());
    }
    for shift in ShiftKey::ALL {
        let window = windows.get(shift);
        lines.push(format!(
            "{:<8} {}-{}",
            shift.display_name(),
            format_hour(window.start),
            format_hour(window.end)
        ));
    }
    lines.join("\n")
}

/// Render the providers list with lock state and assigned shifts
pub fn render_providers(state: &AppState) -> String {
    if state.providers.is_empty() {
        return "No providers yet.".to_string();
    }

    state
        .providers
        .iter()
        .map(|provider| {
            let shifts: Vec<&str> = state
                .shift_assignments
                .shifts_for(&provider.id)
                .iter()
                .map(|s| s.display_name())
                .collect();
            let name = if provider.name.is_empty() {
                "(unnamed)"
            } else {
                provider.name.as_str()
            };
            format!(
                "{}  {:<20} {:>5.1}/hr  [{}]  shifts: {}",
                provider.id,
                name,
                provider.patients_per_hour,
                provider.lock_state(),
                if shifts.is_empty() {
                    "-".to_string()
                } else {
                    shifts.join(", ")
                }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::get_shift_windows;
    use crate::types::{BreakdownItem, Provider, ShiftAssignments};
    use uuid::Uuid;

    #[test]
    fn test_render_estimate_with_breakdown() {
        let result = EstimationResult {
            total: 52,
            breakdown: vec![BreakdownItem {
                provider_name: "Dr. Adams".to_string(),
                shift_name: "Opening".to_string(),
                remaining_hours: 10.0,
                remaining_patients: 46.8,
            }],
            patients_in_lobby: 5,
            is_special_day: false,
        };

        let rendered = render_estimate(&result);
        assert_eq!(
            rendered,
            "Remaining patients: 52\n\
             Breakdown:\n  \
             Lobby: 5 patients\n  \
             Dr. Adams (Opening): 46.8 patients (10.00 hrs remaining)"
        );
    }

    #[test]
    fn test_render_empty_estimate() {
        let result = EstimationResult {
            total: 4,
            breakdown: vec![],
            patients_in_lobby: 4,
            is_special_day: true,
        };

        let rendered = render_estimate(&result);
        assert!(rendered.contains(SPECIAL_DAY_NOTICE));
        assert!(rendered.ends_with(EMPTY_BREAKDOWN_MESSAGE));
        assert!(!rendered.contains("Lobby:"));
    }

    #[test]
    fn test_render_schedule() {
        let rendered = render_schedule(&get_shift_windows(false), false);
        assert_eq!(
            rendered,
            "Opening  08:00-18:00\nMid      09:00-19:00\nClose    10:00-20:00"
        );
    }

    #[test]
    fn test_render_providers() {
        let provider = Provider::new(Uuid::nil()).with_name("Dr. Ng").with_rate(3.5).locked();
        let state = AppState {
            shift_assignments: ShiftAssignments {
                close: vec![provider.id],
                ..Default::default()
            },
            providers: vec![provider],
        };

        let rendered = render_providers(&state);
        assert!(rendered.contains("Dr. Ng"));
        assert!(rendered.contains("3.5/hr"));
        assert!(rendered.contains("[submitted]"));
        assert!(rendered.ends_with("shifts: Close"));
        assert_eq!(render_providers(&AppState::new()), "No providers yet.");
    }
}
