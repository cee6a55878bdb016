//! Team membership mutations
//!
//! Every mutation runs inside one [`SessionStore::with_document`] call, so
//! the roster change and its audit entry are applied atomically and the
//! audit log order matches the order the requests were handled.

use crate::collection::{append, remove_at};
use crate::outcome::{IgnoreReason, MutationOutcome};
use onb_session::{
    fields, AuditTrail, DefaultsProvider, SessionDocument, SessionId, SessionStore, TeamMember, TeamMembers,
};

/// Role given to the self entry when the roster is first listed
pub const DEFAULT_SELF_ROLE: &str = "Administrator";

/// Applies team membership changes and audits them
#[derive(Debug, Clone)]
pub struct TeamMutator {
    audit: AuditTrail,
    self_role: String,
}

impl TeamMutator {
    /// Create mutator recording through `audit`
    #[inline]
    #[must_use]
    pub fn new(audit: AuditTrail) -> Self {
        Self {
            audit,
            self_role: DEFAULT_SELF_ROLE.to_string(),
        }
    }

    /// With role assigned to the self entry
    #[inline]
    #[must_use]
    pub fn with_self_role(mut self, role: impl Into<String>) -> Self {
        self.self_role = role.into();
        self
    }

    /// Seed the roster with the actor's own entry if it is absent
    ///
    /// Does nothing before sign-in. Returns true if the roster was seeded.
    pub fn seed_self_in(&self, document: &mut SessionDocument) -> bool {
        let Some(actor) = document.actor().map(ToString::to_string) else {
            return false;
        };
        document.ensure_collection::<TeamMembers, _>(|_| {
            vec![TeamMember::self_entry(actor, self.self_role.clone())]
        })
    }

    /// Invite a member into a locked document
    pub fn invite_in(
        &self,
        document: &mut SessionDocument,
        defaults: &DefaultsProvider,
        email: &str,
        role: &str,
    ) -> MutationOutcome {
        if email.is_empty() {
            return IgnoreReason::MissingEmail.into();
        }
        if role.is_empty() {
            return IgnoreReason::MissingRole.into();
        }

        let position = append(
            document.collection_mut::<TeamMembers>(defaults),
            TeamMember::invited(email, role),
        );
        tracing::debug!(session = %document.identity(), position, "Team member invited");

        let actor = document.actor().map(ToString::to_string);
        let entry = self.audit.append_to(
            document,
            defaults,
            format!("Invited team member {email} as {role}"),
            actor.as_deref(),
        );
        MutationOutcome::Applied { entry }
    }

    /// Remove the member at `index` from a locked document
    pub fn remove_in(
        &self,
        document: &mut SessionDocument,
        defaults: &DefaultsProvider,
        index: usize,
    ) -> MutationOutcome {
        let removed = if document.is_materialized(fields::TEAM_MEMBERS) {
            remove_at(document.collection_mut::<TeamMembers>(defaults), index)
        } else {
            Err(IgnoreReason::IndexOutOfRange { index, len: 0 })
        };
        let removed = match removed {
            Ok(member) => member,
            Err(reason) => {
                tracing::debug!(session = %document.identity(), %reason, "Team member removal ignored");
                return reason.into();
            }
        };

        let actor = document.actor().map(ToString::to_string);
        let entry = self.audit.append_to(
            document,
            defaults,
            format!("Removed team member {}", removed.email),
            actor.as_deref(),
        );
        MutationOutcome::Applied { entry }
    }

    /// Invite a member into a session
    ///
    /// Empty `email` or `role` leaves the session unchanged.
    pub fn invite(&self, store: &SessionStore, session: &SessionId, email: &str, role: &str) -> MutationOutcome {
        store.with_document(session, |document, defaults| {
            self.invite_in(document, defaults, email, role)
        })
    }

    /// Remove the member at `index` from a session
    ///
    /// Out-of-range indices and the self entry leave the session unchanged.
    pub fn remove(&self, store: &SessionStore, session: &SessionId, index: usize) -> MutationOutcome {
        store.with_document(session, |document, defaults| {
            self.remove_in(document, defaults, index)
        })
    }

    /// Current roster, seeding the self entry on first listing
    pub fn list(&self, store: &SessionStore, session: &SessionId) -> Vec<TeamMember> {
        store.with_document(session, |document, defaults| {
            if self.seed_self_in(document) {
                tracing::debug!(session = %document.identity(), "Team roster seeded with self entry");
            }
            document.resolve_collection::<TeamMembers>(defaults).into_owned()
        })
    }
}

impl Default for TeamMutator {
    fn default() -> Self {
        Self::new(AuditTrail::default())
    }
}
