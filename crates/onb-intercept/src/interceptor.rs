//! Configuration update interceptor
//!
//! At most one audit entry is recorded per update. When several recognized
//! fields arrive together, only the highest-priority category is recorded
//! and the rest are reported at debug level.

use crate::category::AuditCategory;
use onb_session::{AuditEntry, AuditTrail, DefaultsProvider, FieldValue, SessionDocument, SessionId, SessionStore};
use std::collections::BTreeMap;

/// Submitted configuration form: field name to value
pub type ConfigUpdate = BTreeMap<String, FieldValue>;

/// Decides and records the audit category of a configuration update
#[derive(Debug, Clone, Default)]
pub struct ConfigMutationInterceptor {
    audit: AuditTrail,
}

impl ConfigMutationInterceptor {
    /// Create interceptor recording through `audit`
    #[inline]
    #[must_use]
    pub fn new(audit: AuditTrail) -> Self {
        Self { audit }
    }

    /// Every recognized category present in `update`, in priority order
    ///
    /// Text counts as present when non-empty; a list counts even when empty.
    #[must_use]
    pub fn matched_categories(update: &ConfigUpdate) -> Vec<AuditCategory> {
        AuditCategory::PRIORITY
            .into_iter()
            .filter(|category| update.get(category.trigger_field()).is_some_and(is_present))
            .collect()
    }

    /// Category of `update`: the first present field in priority order
    #[must_use]
    pub fn classify(update: &ConfigUpdate) -> Option<AuditCategory> {
        Self::matched_categories(update).first().copied()
    }

    /// Record the update's category in a locked document
    ///
    /// Returns the recorded entry, or `None` if nothing recognized changed.
    pub fn record_in(
        &self,
        document: &mut SessionDocument,
        defaults: &DefaultsProvider,
        update: &ConfigUpdate,
    ) -> Option<AuditEntry> {
        let matched = Self::matched_categories(update);
        let (&category, suppressed) = matched.split_first()?;
        if !suppressed.is_empty() {
            tracing::debug!(
                session = %document.identity(),
                recorded = %category,
                suppressed = ?suppressed,
                "Multiple configuration categories in one update; recording first only"
            );
        }

        let actor = document.actor().map(ToString::to_string);
        Some(self.audit.append_to(document, defaults, category.action(), actor.as_deref()))
    }

    /// Record the update's category in a session
    pub fn record(&self, store: &SessionStore, session: &SessionId, update: &ConfigUpdate) -> Option<AuditEntry> {
        store.with_document(session, |document, defaults| {
            self.record_in(document, defaults, update)
        })
    }
}

fn is_present(value: &FieldValue) -> bool {
    match value {
        FieldValue::Text(text) => !text.is_empty(),
        FieldValue::List(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onb_session::{fields, AuditLog};
    use std::sync::Arc;

    fn update(pairs: &[(&str, &str)]) -> ConfigUpdate {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), FieldValue::from(*value)))
            .collect()
    }

    #[test]
    fn classify_each_field() {
        let cases = [
            (fields::CLIENT_NAME, AuditCategory::ServiceName),
            (fields::PUBLIC_KEY_TYPE, AuditCategory::AuthenticationSettings),
            (fields::REDIRECT_URLS, AuditCategory::RedirectUrls),
            (fields::SELECTED_SCOPES, AuditCategory::Scopes),
        ];
        for (field, expected) in cases {
            assert_eq!(
                ConfigMutationInterceptor::classify(&update(&[(field, "x")])),
                Some(expected)
            );
        }
    }

    #[test]
    fn classify_prefers_priority_order() {
        let payload = update(&[(fields::REDIRECT_URLS, "https://a"), (fields::CLIENT_NAME, "New")]);
        assert_eq!(
            ConfigMutationInterceptor::classify(&payload),
            Some(AuditCategory::ServiceName)
        );
        assert_eq!(
            ConfigMutationInterceptor::matched_categories(&payload),
            vec![AuditCategory::ServiceName, AuditCategory::RedirectUrls]
        );
    }

    #[test]
    fn classify_counts_empty_scope_list() {
        let mut scopes = ConfigUpdate::new();
        scopes.insert(fields::SELECTED_SCOPES.to_string(), FieldValue::List(vec![]));

        assert_eq!(ConfigMutationInterceptor::classify(&scopes), Some(AuditCategory::Scopes));
        assert_eq!(
            ConfigMutationInterceptor::matched_categories(&scopes),
            vec![AuditCategory::Scopes]
        );
    }

    #[test]
    fn classify_ignores_unrecognized_and_blank() {
        assert_eq!(ConfigMutationInterceptor::classify(&update(&[("clientId", "X")])), None);
        assert_eq!(ConfigMutationInterceptor::classify(&update(&[(fields::CLIENT_NAME, "")])), None);

        let mut scopes = ConfigUpdate::new();
        scopes.insert(fields::SELECTED_SCOPES.to_string(), FieldValue::from(""));
        assert_eq!(ConfigMutationInterceptor::classify(&scopes), None);

        scopes.insert(fields::SELECTED_SCOPES.to_string(), FieldValue::from(&["phone"][..]));
        assert_eq!(ConfigMutationInterceptor::classify(&scopes), Some(AuditCategory::Scopes));
    }

    #[test]
    fn record_appends_exactly_one_entry() {
        let store = SessionStore::new(Arc::new(DefaultsProvider::new()));
        let session = store.provision();
        store.set(&session, fields::USER_EMAIL, "alice@gov.uk");
        let interceptor = ConfigMutationInterceptor::default();

        let payload = update(&[(fields::CLIENT_NAME, "New"), (fields::REDIRECT_URLS, "https://a")]);
        let entry = interceptor.record(&store, &session, &payload).unwrap();

        assert_eq!(entry.action, "Updated service name");
        assert_eq!(entry.actor.as_deref(), Some("alice@gov.uk"));
        let document = store.snapshot(&session).unwrap();
        assert_eq!(document.collection::<AuditLog>().map(<[AuditEntry]>::len), Some(1));
    }

    #[test]
    fn record_without_match_leaves_log_absent() {
        let store = SessionStore::new(Arc::new(DefaultsProvider::builtin()));
        let session = store.provision();
        let interceptor = ConfigMutationInterceptor::default();

        assert!(interceptor.record(&store, &session, &update(&[("clientId", "X")])).is_none());
        assert!(!store.snapshot(&session).unwrap().is_materialized(fields::AUDIT_LOG));
    }
}
