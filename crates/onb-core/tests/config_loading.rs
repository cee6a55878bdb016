//! Functional tests for file-based configuration.
//!
//! The service can be stood up from a TOML configuration and a TOML
//! defaults seed; both must round into the behavior the workflow sees.

use onb_core::prelude::*;
use onb_core::SIGN_IN_ERROR;
use std::fs;
use std::sync::Arc;

const CONFIG: &str = r#"
self_role = "Owner"
sign_in_domain = "example.org"
audit_date_format = "%Y-%m-%d %H:%M"
"#;

const DEFAULTS: &str = r#"
clientName = "Seeded client"
clientId = "SEED-1"
scopes = ["openid"]
prod_clientId = "SEED-PROD-1"
"#;

#[derive(Debug)]
struct Noon;

impl onb_core::Clock for Noon {
    fn now(&self) -> chrono::NaiveDateTime {
        onb_test_utils::fixed_start()
    }
}

#[test]
fn service_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("onboarding.toml");
    let defaults_path = dir.path().join("defaults.toml");
    fs::write(&config_path, CONFIG).unwrap();
    fs::write(&defaults_path, DEFAULTS).unwrap();

    let config = OnboardingConfig::load(&config_path).unwrap();
    let defaults = DefaultsProvider::load(&defaults_path).unwrap();
    let service = OnboardingService::with_clock(config, defaults, Arc::new(Noon));
    let ctx = service.start_session();

    let rejected = service.sign_in(&ctx, "alice@gov.uk").unwrap();
    assert_eq!(
        rejected,
        SignInOutcome::Rejected {
            message: SIGN_IN_ERROR.to_string()
        }
    );
    assert!(service.sign_in(&ctx, "alice@example.org").unwrap().is_accepted());

    assert_eq!(service.team_members(&ctx).unwrap()[0].role, "Owner");
    assert_eq!(
        service.field_for(&ctx, Environment::Production, fields::CLIENT_ID).unwrap(),
        Some(FieldValue::from("SEED-PROD-1"))
    );

    let outcome = service.invite_member(&ctx, "bob@example.org", "Editor").unwrap();
    assert_eq!(outcome.entry().map(|e| e.date.as_str()), Some("2026-02-10 12:00"));
}

#[test]
fn unreadable_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = OnboardingConfig::load(dir.path().join("missing.toml")).unwrap_err();

    assert!(matches!(err, OnboardingError::Io(_)));
    assert!(!err.requires_sign_in());
}

#[test]
fn idle_sessions_are_evicted() {
    let config = OnboardingConfig::new().with_session_idle_timeout(std::time::Duration::ZERO);
    let service = OnboardingService::new(config, DefaultsProvider::builtin());
    let ctx = service.start_session();
    service.set_field(&ctx, fields::CLIENT_ID, "X").unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));

    assert_eq!(service.evict_idle(), 1);
    assert_eq!(
        service.field(&ctx, fields::CLIENT_ID).unwrap(),
        Some(FieldValue::from("INTEG-883920"))
    );
}

#[test]
fn configured_fallback_service_name_is_used_at_sign_in() {
    let config = OnboardingConfig::new().with_fallback_service_name("Unnamed service");
    let service = OnboardingService::new(config, DefaultsProvider::new());
    let ctx = service.start_session();

    service.sign_in(&ctx, "alice@gov.uk").unwrap();

    assert_eq!(
        service.field(&ctx, fields::SERVICE_NAME).unwrap(),
        Some(FieldValue::from("Unnamed service"))
    );
}
