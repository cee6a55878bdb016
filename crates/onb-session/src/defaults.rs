//! Read-only seed document shared by every session
//!
//! Holds the integration values of the service configuration, a parallel
//! production variant of each (stored under `prod_<field>`), and the audit
//! log every session starts from.

use crate::error::SessionError;
use crate::types::{fields, AuditEntry, FieldValue};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

/// Deployment environment a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Integration (unprefixed fields)
    #[default]
    Integration,
    /// Production (`prod_` prefixed fields)
    Production,
}

impl Environment {
    /// Storage key of `field` in this environment
    #[must_use]
    pub fn key<'a>(&self, field: &'a str) -> Cow<'a, str> {
        match self {
            Self::Integration => Cow::Borrowed(field),
            Self::Production => Cow::Owned(format!("{}{field}", fields::PRODUCTION_PREFIX)),
        }
    }
}

/// Immutable seed for session documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsProvider {
    /// Seed audit log
    #[serde(default, rename = "auditLog")]
    audit_log: Vec<AuditEntry>,

    /// Seed fields keyed by name
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,
}

impl DefaultsProvider {
    /// Create empty provider
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed used by the onboarding prototype
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .with_field(fields::SERVICE_NAME, "Department for Example Service (Integration)")
            .with_field(fields::CLIENT_NAME, "Department for Example Service (Integration)")
            .with_field(fields::CLIENT_ID, "INTEG-883920")
            .with_field(fields::PUBLIC_KEY_TYPE, "Public key URL (JWKS)")
            .with_field(fields::REDIRECT_URLS, "http://localhost:3000/auth/callback")
            .with_field(fields::SCOPES, &["openid", "email"][..])
            .with_env_field(Environment::Production, fields::SERVICE_NAME, "Department for Example Service")
            .with_env_field(Environment::Production, fields::CLIENT_ID, "PROD-112233")
            .with_env_field(Environment::Production, fields::PUBLIC_KEY_TYPE, "Public key URL (JWKS)")
            .with_env_field(
                Environment::Production,
                fields::REDIRECT_URLS,
                "https://service.gov.uk/auth/callback",
            )
            .with_env_field(Environment::Production, fields::SCOPES, &["openid", "email", "phone"][..])
            .with_audit_seed(AuditEntry::new(
                "Service created",
                Some("admin@gov.uk".to_string()),
                "10 Feb 2026, 10:00am",
            ))
            .with_audit_seed(AuditEntry::new(
                "Production access requested",
                Some("admin@gov.uk".to_string()),
                "10 Feb 2026, 11:30am",
            ))
    }

    /// Parse a TOML seed
    ///
    /// Top-level keys become fields; `[[auditLog]]` tables become the
    /// audit seed.
    ///
    /// # Errors
    /// Returns `SessionError::InvalidDefaults` if the document is malformed
    pub fn from_toml_str(source: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a TOML seed from disk
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let provider = Self::from_toml_str(&source)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            fields = provider.fields.len(),
            "Loaded defaults seed"
        );
        Ok(provider)
    }

    /// With seed field
    #[inline]
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// With seed field for an environment
    #[inline]
    #[must_use]
    pub fn with_env_field(
        self,
        env: Environment,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Self {
        let key = env.key(name).into_owned();
        self.with_field(key, value)
    }

    /// With seed audit entry
    #[inline]
    #[must_use]
    pub fn with_audit_seed(mut self, entry: AuditEntry) -> Self {
        self.audit_log.push(entry);
        self
    }

    /// Default value of a field
    #[inline]
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Default value of a field in an environment
    #[inline]
    #[must_use]
    pub fn field_for(&self, env: Environment, name: &str) -> Option<&FieldValue> {
        self.fields.get(env.key(name).as_ref())
    }

    /// All seed fields in name order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Seed audit log
    #[inline]
    #[must_use]
    pub fn audit_seed(&self) -> &[AuditEntry] {
        &self.audit_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SEED: &str = r#"
serviceName = "Example (Integration)"
clientId = "INTEG-1"
scopes = ["openid", "email"]
prod_clientId = "PROD-1"

[[auditLog]]
action = "Service created"
actor = "admin@gov.uk"
date = "10 Feb 2026, 10:00am"
"#;

    #[test]
    fn environment_keys() {
        assert_eq!(Environment::Integration.key("clientId"), "clientId");
        assert_eq!(Environment::Production.key("clientId"), "prod_clientId");
    }

    #[test]
    fn builtin_has_parallel_production_values() {
        let defaults = DefaultsProvider::builtin();
        assert_eq!(
            defaults.field_for(Environment::Integration, fields::CLIENT_ID),
            Some(&FieldValue::from("INTEG-883920"))
        );
        assert_eq!(
            defaults.field_for(Environment::Production, fields::CLIENT_ID),
            Some(&FieldValue::from("PROD-112233"))
        );
        assert_eq!(defaults.audit_seed().len(), 2);
    }

    #[test]
    fn parses_toml_seed() {
        let defaults = DefaultsProvider::from_toml_str(SEED).unwrap();

        assert_eq!(defaults.field("clientId"), Some(&FieldValue::from("INTEG-1")));
        assert_eq!(
            defaults.field("scopes"),
            Some(&FieldValue::from(&["openid", "email"][..]))
        );
        assert_eq!(defaults.field_for(Environment::Production, "clientId"), Some(&FieldValue::from("PROD-1")));
        assert_eq!(defaults.audit_seed()[0].actor.as_deref(), Some("admin@gov.uk"));
        assert!(defaults.field(fields::AUDIT_LOG).is_none());
    }

    #[test]
    fn audit_seed_actor_is_optional() {
        let defaults = DefaultsProvider::from_toml_str(
            "[[auditLog]]\naction = \"Imported\"\ndate = \"1 Jan 2026, 09:00\"\n",
        )
        .unwrap();
        assert_eq!(defaults.audit_seed()[0].actor, None);
    }

    #[test]
    fn rejects_malformed_seed() {
        let result = DefaultsProvider::from_toml_str("clientId = ");
        assert!(matches!(result, Err(SessionError::InvalidDefaults(_))));
    }

    #[test]
    fn loads_seed_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defaults.toml");
        std::fs::write(&path, SEED).unwrap();

        let defaults = DefaultsProvider::load(&path).unwrap();
        assert_eq!(defaults, DefaultsProvider::from_toml_str(SEED).unwrap());
    }

    #[test]
    fn missing_seed_file_is_io_error() {
        let result = DefaultsProvider::load("/nonexistent/defaults.toml");
        assert!(matches!(result, Err(SessionError::Io(_))));
    }
}
