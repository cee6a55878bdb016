//! Session document with copy-on-write fields and typed collections
//!
//! Every field and collection carries explicit presence: a value that is
//! absent from the document resolves to the seed in [`DefaultsProvider`],
//! and only a write copies it into the document.

use crate::defaults::{DefaultsProvider, Environment};
use crate::types::{fields, AuditEntry, FieldValue, SessionId, TeamMember};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Ordered collection embedded in a session document
///
/// Implemented by marker types so collections can be addressed by type
/// rather than by a free-form name.
pub trait SessionCollection {
    /// Element type
    type Item: Clone;

    /// Field name of the collection
    const NAME: &'static str;

    /// Storage slot inside the document
    fn slot(document: &mut SessionDocument) -> &mut Option<Vec<Self::Item>>;

    /// Materialized contents, if any
    fn view(document: &SessionDocument) -> Option<&[Self::Item]>;

    /// Contents used when the collection is first materialized by a write
    fn default_seed(defaults: &DefaultsProvider) -> Vec<Self::Item>;
}

/// Team member collection marker
#[derive(Debug, Clone, Copy)]
pub struct TeamMembers;

impl SessionCollection for TeamMembers {
    type Item = TeamMember;

    const NAME: &'static str = fields::TEAM_MEMBERS;

    fn slot(document: &mut SessionDocument) -> &mut Option<Vec<TeamMember>> {
        &mut document.team_members
    }

    fn view(document: &SessionDocument) -> Option<&[TeamMember]> {
        document.team_members.as_deref()
    }

    fn default_seed(_defaults: &DefaultsProvider) -> Vec<TeamMember> {
        Vec::new()
    }
}

/// Audit log collection marker
#[derive(Debug, Clone, Copy)]
pub struct AuditLog;

impl SessionCollection for AuditLog {
    type Item = AuditEntry;

    const NAME: &'static str = fields::AUDIT_LOG;

    fn slot(document: &mut SessionDocument) -> &mut Option<Vec<AuditEntry>> {
        &mut document.audit_log
    }

    fn view(document: &SessionDocument) -> Option<&[AuditEntry]> {
        document.audit_log.as_deref()
    }

    fn default_seed(defaults: &DefaultsProvider) -> Vec<AuditEntry> {
        defaults.audit_seed().to_vec()
    }
}

/// Complete mutable state of one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDocument {
    identity: SessionId,
    fields: BTreeMap<String, FieldValue>,
    team_members: Option<Vec<TeamMember>>,
    audit_log: Option<Vec<AuditEntry>>,
}

impl SessionDocument {
    /// Create empty document
    #[inline]
    #[must_use]
    pub fn new(identity: SessionId) -> Self {
        Self {
            identity,
            fields: BTreeMap::new(),
            team_members: None,
            audit_log: None,
        }
    }

    /// Session identity
    #[inline]
    #[must_use]
    pub fn identity(&self) -> SessionId {
        self.identity
    }

    /// Session's own value of a field (no fallback)
    #[inline]
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Whether the session holds its own value for `name`
    #[must_use]
    pub fn is_materialized(&self, name: &str) -> bool {
        match name {
            fields::TEAM_MEMBERS => self.team_members.is_some(),
            fields::AUDIT_LOG => self.audit_log.is_some(),
            _ => self.fields.contains_key(name),
        }
    }

    /// Copy-on-write read: session value, else default
    #[inline]
    #[must_use]
    pub fn resolve<'a>(&'a self, defaults: &'a DefaultsProvider, name: &str) -> Option<&'a FieldValue> {
        self.fields.get(name).or_else(|| defaults.field(name))
    }

    /// Copy-on-write read in an environment
    #[inline]
    #[must_use]
    pub fn resolve_for<'a>(
        &'a self,
        defaults: &'a DefaultsProvider,
        env: Environment,
        name: &str,
    ) -> Option<&'a FieldValue> {
        self.resolve(defaults, env.key(name).as_ref())
    }

    /// Overwrite a field, returning the previous session value
    #[inline]
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.fields.insert(name.into(), value.into())
    }

    /// Signed-in actor, taken from the session's `userEmail`
    #[inline]
    #[must_use]
    pub fn actor(&self) -> Option<&str> {
        self.fields.get(fields::USER_EMAIL).and_then(FieldValue::as_text)
    }

    /// Materialized collection contents
    #[inline]
    #[must_use]
    pub fn collection<C: SessionCollection>(&self) -> Option<&[C::Item]> {
        C::view(self)
    }

    /// Collection contents, falling back to the default seed
    #[must_use]
    pub fn resolve_collection<C: SessionCollection>(&self, defaults: &DefaultsProvider) -> Cow<'_, [C::Item]> {
        match C::view(self) {
            Some(items) => Cow::Borrowed(items),
            None => Cow::Owned(C::default_seed(defaults)),
        }
    }

    /// Seed a collection via `seed` when absent
    ///
    /// Returns true if the collection was seeded by this call.
    pub fn ensure_collection<C, F>(&mut self, seed: F) -> bool
    where
        C: SessionCollection,
        F: FnOnce(&Self) -> Vec<C::Item>,
    {
        if C::view(self).is_some() {
            return false;
        }
        let items = seed(self);
        *C::slot(self) = Some(items);
        true
    }

    /// Mutable collection, materialized from the default seed when absent
    pub fn collection_mut<C: SessionCollection>(&mut self, defaults: &DefaultsProvider) -> &mut Vec<C::Item> {
        C::slot(self).get_or_insert_with(|| C::default_seed(defaults))
    }

    /// Effective state for rendering
    #[must_use]
    pub fn view(&self, defaults: &DefaultsProvider) -> SessionView {
        let mut effective: BTreeMap<String, FieldValue> = defaults
            .fields()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        effective.extend(self.fields.iter().map(|(name, value)| (name.clone(), value.clone())));

        SessionView {
            identity: self.identity,
            actor: self.actor().map(ToString::to_string),
            fields: effective,
            team_members: self.resolve_collection::<TeamMembers>(defaults).into_owned(),
            audit_log: self.resolve_collection::<AuditLog>(defaults).into_owned(),
        }
    }
}

/// Rendered snapshot of a session: defaults overlaid with session values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Session identity
    pub identity: SessionId,
    /// Signed-in actor
    pub actor: Option<String>,
    /// Effective field values
    pub fields: BTreeMap<String, FieldValue>,
    /// Team members (empty until listed or invited)
    pub team_members: Vec<TeamMember>,
    /// Audit log, oldest first
    pub audit_log: Vec<AuditEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> SessionDocument {
        SessionDocument::new(SessionId::new())
    }

    #[test]
    fn read_falls_through_without_materializing() {
        let defaults = DefaultsProvider::builtin();
        let document = doc();

        assert_eq!(
            document.resolve(&defaults, fields::CLIENT_ID),
            Some(&FieldValue::from("INTEG-883920"))
        );
        assert!(!document.is_materialized(fields::CLIENT_ID));
    }

    #[test]
    fn write_takes_precedence() {
        let defaults = DefaultsProvider::builtin();
        let mut document = doc();

        document.set(fields::CLIENT_ID, "X");

        assert!(document.is_materialized(fields::CLIENT_ID));
        assert_eq!(document.resolve(&defaults, fields::CLIENT_ID), Some(&FieldValue::from("X")));
    }

    #[test]
    fn production_fields_resolve_by_prefix() {
        let defaults = DefaultsProvider::builtin();
        let mut document = doc();

        assert_eq!(
            document.resolve_for(&defaults, Environment::Production, fields::CLIENT_ID),
            Some(&FieldValue::from("PROD-112233"))
        );

        document.set("prod_clientId", "PROD-9");
        assert_eq!(
            document.resolve_for(&defaults, Environment::Production, fields::CLIENT_ID),
            Some(&FieldValue::from("PROD-9"))
        );
        assert_eq!(
            document.resolve(&defaults, fields::CLIENT_ID),
            Some(&FieldValue::from("INTEG-883920"))
        );
    }

    #[test]
    fn ensure_collection_is_idempotent() {
        let mut document = doc();

        let seeded = document.ensure_collection::<TeamMembers, _>(|_| {
            vec![TeamMember::self_entry("alice@gov.uk", "Administrator")]
        });
        assert!(seeded);

        let seeded_again = document.ensure_collection::<TeamMembers, _>(|_| {
            vec![TeamMember::self_entry("mallory@gov.uk", "Administrator")]
        });
        assert!(!seeded_again);

        let members = document.collection::<TeamMembers>().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].email, "alice@gov.uk");
    }

    #[test]
    fn seed_function_reads_session_fields() {
        let mut document = doc();
        document.set(fields::USER_EMAIL, "alice@gov.uk");

        document.ensure_collection::<TeamMembers, _>(|d| {
            vec![TeamMember::self_entry(d.actor().unwrap_or_default(), "Administrator")]
        });

        assert_eq!(document.collection::<TeamMembers>().unwrap()[0].email, "alice@gov.uk");
    }

    #[test]
    fn team_members_materialize_empty() {
        let defaults = DefaultsProvider::builtin();
        let mut document = doc();

        assert!(document.collection_mut::<TeamMembers>(&defaults).is_empty());
        assert!(document.is_materialized(fields::TEAM_MEMBERS));
    }

    #[test]
    fn audit_log_materializes_from_seed() {
        let defaults = DefaultsProvider::builtin();
        let mut document = doc();

        assert_eq!(document.resolve_collection::<AuditLog>(&defaults).len(), 2);
        assert!(!document.is_materialized(fields::AUDIT_LOG));

        assert_eq!(document.collection_mut::<AuditLog>(&defaults).len(), 2);
        assert!(document.is_materialized(fields::AUDIT_LOG));
    }

    #[test]
    fn view_overlays_session_values() {
        let defaults = DefaultsProvider::builtin();
        let mut document = doc();
        document.set(fields::CLIENT_NAME, "Renamed");
        document.set("garbage", "kept");

        let view = document.view(&defaults);
        assert_eq!(view.fields.get(fields::CLIENT_NAME), Some(&FieldValue::from("Renamed")));
        assert_eq!(view.fields.get(fields::CLIENT_ID), Some(&FieldValue::from("INTEG-883920")));
        assert_eq!(view.fields.get("garbage"), Some(&FieldValue::from("kept")));
        assert!(view.team_members.is_empty());
        assert_eq!(view.audit_log.len(), 2);
    }
}
