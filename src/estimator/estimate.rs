//! Aggregation of per-assignment remainders into an estimate

use crate::estimator::calculator::{remaining_hours, remaining_patients_for_provider};
use crate::shift::{assigned_providers, get_shift_windows, is_special_day};
use crate::types::{AppState, BreakdownItem, ClockTime, EstimationResult, ShiftKey};
use crate::utils::round_to;
use chrono::NaiveDate;
use tracing::debug;

/// Everything one estimate needs
#[derive(Debug, Clone, Copy)]
pub struct EstimationContext<'a> {
    pub selected_date: NaiveDate,
    pub current_time: ClockTime,
    pub patients_in_lobby: u32,
    pub state: &'a AppState,
}

impl<'a> EstimationContext<'a> {
    pub fn new(
        selected_date: NaiveDate,
        current_time: ClockTime,
        patients_in_lobby: u32,
        state: &'a AppState,
    ) -> Self {
        Self {
            selected_date,
            current_time,
            patients_in_lobby,
            state,
        }
    }
}

/// Estimate the patients still to be seen today.
///
/// The total sums unrounded remainders and is rounded once at the end. Only
/// the breakdown values are rounded for display; assignments that contribute
/// nothing are left out of the breakdown.
pub fn estimate(context: &EstimationContext<'_>) -> EstimationResult {
    let special_day = is_special_day(context.selected_date);
    let windows = get_shift_windows(special_day);

    let mut total = context.patients_in_lobby as f64;
    let mut breakdown = Vec::new();

    for shift in ShiftKey::ALL {
        let window = windows.get(shift);

        for provider in assigned_providers(context.state, shift) {
            let hours = remaining_hours(
                context.current_time.hour,
                context.current_time.minute,
                window.start,
                window.end,
            );
            let patients = remaining_patients_for_provider(provider, hours);
            total += patients;

            if patients > 0.0 {
                breakdown.push(BreakdownItem {
                    provider_name: provider.name.clone(),
                    shift_name: shift.display_name().to_string(),
                    remaining_hours: round_to(hours, 2),
                    remaining_patients: round_to(patients, 1),
                });
            }
        }
    }

    debug!(
        "Estimated {:.2} remaining patients on {} at {} (special day: {}, lobby: {}, contributing assignments: {})",
        total,
        context.selected_date,
        context.current_time,
        special_day,
        context.patients_in_lobby,
        breakdown.len()
    );

    EstimationResult {
        total: total.round() as u64,
        breakdown,
        patients_in_lobby: context.patients_in_lobby,
        is_special_day: special_day,
    }
}
