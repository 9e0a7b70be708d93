//! Test fixtures and helpers for integration testing

#![allow(dead_code)]

use chrono::NaiveDate;
use clinic_staffing::error::Result;
use clinic_staffing::state::{apply, Command, StateStore};
use clinic_staffing::types::{AppState, ClockTime, ProviderId, ShiftKey};
use std::sync::Arc;

/// 2024-06-10, a Monday
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

/// 2024-06-13, a Thursday
pub fn thursday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 13).unwrap()
}

pub fn at(hour: u32, minute: u32) -> ClockTime {
    ClockTime::new(hour, minute).unwrap()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// A front-desk session: every accepted action is saved immediately
pub struct Session {
    pub state: AppState,
    store: Arc<dyn StateStore>,
}

impl Session {
    /// Open a session on whatever the store holds
    pub fn open(store: Arc<dyn StateStore>) -> Result<Self> {
        let state = store.load()?;
        Ok(Self { state, store })
    }

    /// Apply and persist one command; rejected commands change nothing
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        let next = apply(&self.state, command)?;
        self.store.save(&next)?;
        self.state = next;
        Ok(())
    }

    /// Add a provider with a name and rate, optionally locking it
    pub fn add_provider(&mut self, name: &str, rate: &str, submit: bool) -> Result<ProviderId> {
        let add = Command::add_provider();
        let id = add.provider_id();
        self.dispatch(add)?;
        self.dispatch(Command::SetName {
            id,
            value: name.to_string(),
        })?;
        self.dispatch(Command::SetRate {
            id,
            value: rate.to_string(),
        })?;
        if submit {
            self.dispatch(Command::Submit { id })?;
        }
        Ok(id)
    }

    pub fn assign(&mut self, shift: ShiftKey, id: ProviderId) -> Result<()> {
        self.dispatch(Command::ToggleAssignment { shift, id })
    }
}
