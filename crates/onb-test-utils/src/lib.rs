//! Testing utilities for the onboarding workspace
//!
//! Shared test helpers, fixtures, and a controllable clock.

#![allow(missing_docs)]

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use onb_core::{ConfigUpdate, FieldValue, OnboardingConfig, OnboardingService, RequestContext};
use onb_session::{Clock, DefaultsProvider};
use parking_lot::Mutex;
use std::sync::Arc;

/// Clock that advances one minute per reading
#[derive(Debug)]
pub struct SteppingClock {
    next: Mutex<NaiveDateTime>,
}

impl SteppingClock {
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::starting_at(fixed_start())
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> NaiveDateTime {
        let mut next = self.next.lock();
        let now = *next;
        *next = now + TimeDelta::minutes(1);
        now
    }
}

/// 10 Feb 2026, 12:00
pub fn fixed_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 10)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap()
}

/// Defaults with no audit seed, so logs start empty
pub fn empty_audit_defaults() -> DefaultsProvider {
    let builtin = DefaultsProvider::builtin();
    builtin
        .fields()
        .fold(DefaultsProvider::new(), |acc, (name, value)| acc.with_field(name, value.clone()))
}

pub fn setup_service_with(defaults: DefaultsProvider) -> OnboardingService {
    OnboardingService::with_clock(OnboardingConfig::new(), defaults, Arc::new(SteppingClock::default()))
}

pub fn setup_service() -> OnboardingService {
    setup_service_with(empty_audit_defaults())
}

/// Service plus a session signed in as `email`
pub fn signed_in(email: &str) -> (OnboardingService, RequestContext) {
    let service = setup_service();
    let ctx = service.start_session();
    service.sign_in(&ctx, email).unwrap();
    (service, ctx)
}

pub fn config_update(pairs: &[(&str, &str)]) -> ConfigUpdate {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), FieldValue::from(*value)))
        .collect()
}

pub fn actions(service: &OnboardingService, ctx: &RequestContext) -> Vec<String> {
    service
        .audit_log(ctx)
        .unwrap()
        .into_iter()
        .map(|entry| entry.action)
        .collect()
}

pub fn emails(service: &OnboardingService, ctx: &RequestContext) -> Vec<String> {
    service
        .view(ctx)
        .unwrap()
        .team_members
        .into_iter()
        .map(|member| member.email)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_clock_advances_per_reading() {
        let clock = SteppingClock::default();

        assert_eq!(clock.now(), fixed_start());
        assert_eq!(clock.now(), fixed_start() + TimeDelta::minutes(1));
    }
}
