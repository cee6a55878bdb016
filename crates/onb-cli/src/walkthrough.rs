//! Scripted onboarding walkthrough for one session

use anyhow::{Context, Result};
use onb_core::prelude::*;
use serde::Serialize;

/// One handled request and what it produced
#[derive(Debug, Serialize)]
pub(crate) struct Step {
    pub(crate) request: String,
    pub(crate) outcome: serde_json::Value,
}

/// Result of walking one session through the prototype
#[derive(Debug, Serialize)]
pub(crate) struct WalkthroughReport {
    pub(crate) steps: Vec<Step>,
    pub(crate) view: SessionView,
}

/// Drive a fresh session through sign-in, team and configuration pages
pub(crate) fn run(service: &OnboardingService, n: usize) -> Result<WalkthroughReport> {
    let ctx = service.start_session();
    let actor = format!("user{n}@gov.uk");
    let mut steps = Vec::new();
    let mut record = |request: String, outcome: serde_json::Value| {
        tracing::debug!(walkthrough = n, %request, "Step handled");
        steps.push(Step { request, outcome });
    };

    let outcome = service.sign_in(&ctx, &format!("user{n}@example.com"))?;
    record("POST /sign-in (non-government)".into(), to_json(&outcome)?);

    let outcome = service.sign_in(&ctx, &actor)?;
    record("POST /sign-in".into(), to_json(&outcome)?);

    let members = service.team_members(&ctx)?;
    record("GET /team/index".into(), to_json(&members)?);

    for (email, role) in [
        (format!("colleague{n}a@gov.uk"), "Editor"),
        (format!("colleague{n}b@gov.uk"), ""),
        (format!("colleague{n}c@gov.uk"), "Viewer"),
    ] {
        let outcome = service.invite_member(&ctx, &email, role)?;
        record(format!("POST /team/invite {email} {role:?}"), to_json(&outcome)?);
    }

    for index in [0, 1] {
        let outcome = service.remove_member(&ctx, index)?;
        record(format!("GET /team/remove/{index}"), to_json(&outcome)?);
    }

    let mut update = ConfigUpdate::new();
    update.insert(fields::CLIENT_NAME.to_string(), FieldValue::from(format!("Service {n}")));
    update.insert(
        fields::REDIRECT_URLS.to_string(),
        FieldValue::from(format!("https://service-{n}.gov.uk/auth/callback")),
    );
    let entry = service.update_config(&ctx, update)?;
    record("POST /service-setup/task-list (name, redirects)".into(), to_json(&entry)?);

    let mut update = ConfigUpdate::new();
    update.insert(
        fields::SELECTED_SCOPES.to_string(),
        FieldValue::from(vec!["openid".to_string(), "email".to_string(), "phone".to_string()]),
    );
    let entry = service.update_config(&ctx, update)?;
    record("POST /service-setup/task-list (scopes)".into(), to_json(&entry)?);

    let view = service.view(&ctx)?;
    Ok(WalkthroughReport { steps, view })
}

fn to_json(value: &impl Serialize) -> Result<serde_json::Value> {
    serde_json::to_value(value).context("rendering step outcome")
}
