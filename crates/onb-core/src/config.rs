//! Onboarding service configuration

use crate::error::OnboardingError;
use onb_session::DEFAULT_DATE_FORMAT;
use onb_team::DEFAULT_SELF_ROLE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Onboarding configuration
///
/// Every key is optional in TOML; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingConfig {
    /// Role of the self entry seeded into the team roster
    pub self_role: String,
    /// Substring a sign-in email must contain
    pub sign_in_domain: String,
    /// Service name stored at sign-in when neither session nor defaults have one
    pub fallback_service_name: String,
    /// chrono `strftime` format for audit dates
    pub audit_date_format: String,
    /// Idle time after which a session is discarded
    pub session_idle_timeout_secs: u64,
}

impl OnboardingConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML
    ///
    /// # Errors
    /// Returns `OnboardingError::InvalidConfig` if the document is malformed
    pub fn from_toml_str(source: &str) -> Result<Self, OnboardingError> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OnboardingError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded onboarding configuration");
        Ok(config)
    }

    /// With self role
    #[inline]
    #[must_use]
    pub fn with_self_role(mut self, role: impl Into<String>) -> Self {
        self.self_role = role.into();
        self
    }

    /// With sign-in domain
    #[inline]
    #[must_use]
    pub fn with_sign_in_domain(mut self, domain: impl Into<String>) -> Self {
        self.sign_in_domain = domain.into();
        self
    }

    /// With fallback service name
    #[inline]
    #[must_use]
    pub fn with_fallback_service_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_service_name = name.into();
        self
    }

    /// With audit date format
    #[inline]
    #[must_use]
    pub fn with_audit_date_format(mut self, format: impl Into<String>) -> Self {
        self.audit_date_format = format.into();
        self
    }

    /// With session idle timeout
    #[inline]
    #[must_use]
    pub fn with_session_idle_timeout(mut self, timeout: Duration) -> Self {
        self.session_idle_timeout_secs = timeout.as_secs();
        self
    }

    /// Session idle timeout
    #[inline]
    #[must_use]
    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_secs)
    }
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            self_role: DEFAULT_SELF_ROLE.to_string(),
            sign_in_domain: "gov.uk".to_string(),
            fallback_service_name: "Department for Example Service".to_string(),
            audit_date_format: DEFAULT_DATE_FORMAT.to_string(),
            session_idle_timeout_secs: 3600,
        }
    }
}
