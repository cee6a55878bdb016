//! Onboarding service
//!
//! The entry point the request-handling boundary calls:
//! - Provisions and discards sessions
//! - Signs the actor in
//! - Reads and writes service configuration fields
//! - Manages the team roster
//! - Exposes the audit trail and a renderable view
//!
//! Each operation resolves the session from the [`RequestContext`] and
//! performs its whole mutation, audit entry included, under that session's
//! lock.

use crate::config::OnboardingConfig;
use crate::context::RequestContext;
use crate::error::OnboardingError;
use crate::sign_in::{is_government_email, SignInOutcome, SIGN_IN_ERROR};
use onb_intercept::{ConfigMutationInterceptor, ConfigUpdate};
use onb_session::{
    fields, AuditEntry, AuditLog, AuditTrail, Clock, DefaultsProvider, Environment, FieldValue, SessionStore,
    SessionView, SystemClock, TeamMember,
};
use onb_team::{MutationOutcome, TeamMutator};
use std::sync::Arc;

/// Session-backed onboarding workflow
#[derive(Debug)]
pub struct OnboardingService {
    /// Configuration
    config: OnboardingConfig,
    /// Per-session documents
    store: SessionStore,
    /// Team roster mutations
    team: TeamMutator,
    /// Configuration audit classification
    interceptor: ConfigMutationInterceptor,
}

impl OnboardingService {
    /// Create service using the system clock
    #[must_use]
    pub fn new(config: OnboardingConfig, defaults: DefaultsProvider) -> Self {
        Self::with_clock(config, defaults, Arc::new(SystemClock))
    }

    /// Create service with a custom audit clock
    #[must_use]
    pub fn with_clock(config: OnboardingConfig, defaults: DefaultsProvider, clock: Arc<dyn Clock>) -> Self {
        let audit = AuditTrail::with_clock(clock).with_date_format(config.audit_date_format.clone());
        Self {
            store: SessionStore::new(Arc::new(defaults)),
            team: TeamMutator::new(audit.clone()).with_self_role(config.self_role.clone()),
            interceptor: ConfigMutationInterceptor::new(audit),
            config,
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &OnboardingConfig {
        &self.config
    }

    /// Underlying session store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Provision a new session
    pub fn start_session(&self) -> RequestContext {
        RequestContext::for_session(self.store.provision())
    }

    /// Discard the request's session
    ///
    /// # Errors
    /// Returns `NoSessionContext` if the request has no session
    pub fn end_session(&self, ctx: &RequestContext) -> Result<bool, OnboardingError> {
        let session = ctx.session_id()?;
        Ok(self.store.clear(&session))
    }

    /// Discard sessions idle past the configured timeout
    pub fn evict_idle(&self) -> usize {
        self.store.evict_idle(self.config.session_idle_timeout())
    }

    /// Sign the actor in
    ///
    /// An accepted email becomes the session actor and the service name is
    /// materialized into the session. A rejected email changes nothing.
    ///
    /// # Errors
    /// Returns `NoSessionContext` if the request has no session
    pub fn sign_in(&self, ctx: &RequestContext, email: &str) -> Result<SignInOutcome, OnboardingError> {
        let session = ctx.session_id()?;

        if !is_government_email(email, &self.config.sign_in_domain) {
            tracing::info!(session = %session, "Sign-in rejected");
            return Ok(SignInOutcome::Rejected {
                message: SIGN_IN_ERROR.to_string(),
            });
        }

        self.store.with_document(&session, |document, defaults| {
            document.set(fields::USER_EMAIL, email);
            let service_name = document
                .resolve(defaults, fields::SERVICE_NAME)
                .filter(|value| !value.is_blank())
                .cloned()
                .unwrap_or_else(|| FieldValue::from(self.config.fallback_service_name.as_str()));
            document.set(fields::SERVICE_NAME, service_name);
        });

        tracing::info!(session = %session, actor = %email, "Signed in");
        Ok(SignInOutcome::Accepted {
            actor: email.to_string(),
        })
    }

    /// Signed-in actor, if any
    ///
    /// # Errors
    /// Returns `NoSessionContext` if the request has no session
    pub fn actor(&self, ctx: &RequestContext) -> Result<Option<String>, OnboardingError> {
        let session = ctx.session_id()?;
        Ok(self
            .store
            .read(&session, |document, _| document.actor().map(ToString::to_string)))
    }

    /// Signed-in actor, required
    ///
    /// # Errors
    /// - `NoSessionContext` if the request has no session
    /// - `NotSignedIn` if nobody has signed in
    pub fn require_actor(&self, ctx: &RequestContext) -> Result<String, OnboardingError> {
        self.actor(ctx)?.ok_or(OnboardingError::NotSignedIn)
    }

    /// Field value: session value, else default
    ///
    /// # Errors
    /// Returns `NoSessionContext` if the request has no session
    pub fn field(&self, ctx: &RequestContext, name: &str) -> Result<Option<FieldValue>, OnboardingError> {
        let session = ctx.session_id()?;
        Ok(self.store.get(&session, name))
    }

    /// Field value in an environment: session value, else default
    ///
    /// # Errors
    /// Returns `NoSessionContext` if the request has no session
    pub fn field_for(
        &self,
        ctx: &RequestContext,
        env: Environment,
        name: &str,
    ) -> Result<Option<FieldValue>, OnboardingError> {
        let session = ctx.session_id()?;
        Ok(self.store.get_for(&session, env, name))
    }

    /// Overwrite a field without auditing
    ///
    /// # Errors
    /// Returns `NoSessionContext` if the request has no session
    pub fn set_field(
        &self,
        ctx: &RequestContext,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<(), OnboardingError> {
        let session = ctx.session_id()?;
        self.store.set(&session, name, value);
        Ok(())
    }

    /// Apply a configuration form and audit it
    ///
    /// Every submitted field is stored as-is; at most one audit entry is
    /// recorded, chosen by [`ConfigMutationInterceptor::classify`].
    ///
    /// # Errors
    /// Returns `NoSessionContext` if the request has no session
    pub fn update_config(
        &self,
        ctx: &RequestContext,
        update: ConfigUpdate,
    ) -> Result<Option<AuditEntry>, OnboardingError> {
        let session = ctx.session_id()?;
        Ok(self.store.with_document(&session, |document, defaults| {
            let entry = self.interceptor.record_in(document, defaults, &update);
            for (name, value) in update {
                document.set(name, value);
            }
            entry
        }))
    }

    /// Team roster, seeding the actor's own entry on first listing
    ///
    /// # Errors
    /// - `NoSessionContext` if the request has no session
    /// - `NotSignedIn` if nobody has signed in
    pub fn team_members(&self, ctx: &RequestContext) -> Result<Vec<TeamMember>, OnboardingError> {
        let session = ctx.session_id()?;
        self.require_actor(ctx)?;
        Ok(self.team.list(&self.store, &session))
    }

    /// Invite a team member
    ///
    /// # Errors
    /// Returns `NoSessionContext` if the request has no session
    pub fn invite_member(
        &self,
        ctx: &RequestContext,
        email: &str,
        role: &str,
    ) -> Result<MutationOutcome, OnboardingError> {
        let session = ctx.session_id()?;
        Ok(self.team.invite(&self.store, &session, email, role))
    }

    /// Remove the team member at `index`
    ///
    /// # Errors
    /// Returns `NoSessionContext` if the request has no session
    pub fn remove_member(&self, ctx: &RequestContext, index: usize) -> Result<MutationOutcome, OnboardingError> {
        let session = ctx.session_id()?;
        Ok(self.team.remove(&self.store, &session, index))
    }

    /// Audit log, oldest first
    ///
    /// # Errors
    /// Returns `NoSessionContext` if the request has no session
    pub fn audit_log(&self, ctx: &RequestContext) -> Result<Vec<AuditEntry>, OnboardingError> {
        let session = ctx.session_id()?;
        Ok(self.store.read(&session, |document, defaults| {
            document.resolve_collection::<AuditLog>(defaults).into_owned()
        }))
    }

    /// Renderable snapshot of the session
    ///
    /// # Errors
    /// Returns `NoSessionContext` if the request has no session
    pub fn view(&self, ctx: &RequestContext) -> Result<SessionView, OnboardingError> {
        let session = ctx.session_id()?;
        Ok(self.store.view(&session))
    }
}
