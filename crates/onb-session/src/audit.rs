//! Append-only audit trail embedded in session documents
//!
//! Entries are appended in call order. Appends for one session are
//! serialized by the store's per-session lock, so callers that need an
//! audit entry to follow a mutation must append inside the same
//! [`SessionStore::with_document`](crate::SessionStore::with_document) call.

use crate::defaults::DefaultsProvider;
use crate::document::{AuditLog, SessionDocument};
use crate::store::SessionStore;
use crate::types::{AuditEntry, SessionId};
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Default display format, e.g. `10 Feb 2026, 10:00`
pub const DEFAULT_DATE_FORMAT: &str = "%-d %b %Y, %H:%M";

/// Wall-clock source for audit timestamps
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current local time
    fn now(&self) -> NaiveDateTime;
}

/// Local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Records timestamped audit entries
#[derive(Debug, Clone)]
pub struct AuditTrail {
    clock: Arc<dyn Clock>,
    date_format: String,
}

impl AuditTrail {
    /// Create trail backed by the system clock
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create trail with a custom clock
    #[inline]
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// With date format (chrono `strftime` syntax)
    #[inline]
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Append an entry to an already-locked document
    ///
    /// Materializes the log from the default seed when absent.
    pub fn append_to(
        &self,
        document: &mut SessionDocument,
        defaults: &DefaultsProvider,
        action: impl Into<String>,
        actor: Option<&str>,
    ) -> AuditEntry {
        let date = self.clock.now().format(&self.date_format).to_string();
        let entry = AuditEntry::new(action, actor.map(ToString::to_string), date);

        let log = document.collection_mut::<AuditLog>(defaults);
        log.push(entry.clone());

        tracing::debug!(
            session = %document.identity(),
            action = %entry.action,
            actor = ?entry.actor,
            "Audit entry appended"
        );
        entry
    }

    /// Append an entry to a session's log
    pub fn append(
        &self,
        store: &SessionStore,
        session: &SessionId,
        action: impl Into<String>,
        actor: Option<&str>,
    ) -> AuditEntry {
        let action = action.into();
        store.with_document(session, |document, defaults| {
            self.append_to(document, defaults, action, actor)
        })
    }
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Debug)]
    struct StoppedClock(NaiveDateTime);

    impl Clock for StoppedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    fn stopped() -> Arc<dyn Clock> {
        let at = NaiveDate::from_ymd_opt(2026, 2, 10)
            .and_then(|d| d.and_hms_opt(9, 5, 0))
            .unwrap();
        Arc::new(StoppedClock(at))
    }

    #[test]
    fn formats_like_en_gb_short_date() {
        let trail = AuditTrail::with_clock(stopped());
        let mut document = SessionDocument::new(SessionId::new());

        let entry = trail.append_to(&mut document, &DefaultsProvider::new(), "Updated scopes", Some("a@gov.uk"));

        assert_eq!(entry.date, "10 Feb 2026, 09:05");
        assert_eq!(entry.actor.as_deref(), Some("a@gov.uk"));
    }

    #[test]
    fn custom_date_format() {
        let trail = AuditTrail::with_clock(stopped()).with_date_format("%Y-%m-%d");
        let mut document = SessionDocument::new(SessionId::new());

        let entry = trail.append_to(&mut document, &DefaultsProvider::new(), "x", None);
        assert_eq!(entry.date, "2026-02-10");
        assert_eq!(entry.actor, None);
    }

    #[test]
    fn first_append_keeps_seed_entries() {
        let trail = AuditTrail::with_clock(stopped());
        let defaults = DefaultsProvider::builtin();
        let mut document = SessionDocument::new(SessionId::new());

        trail.append_to(&mut document, &defaults, "Updated scopes", None);

        let log = document.collection::<AuditLog>().unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].action, "Service created");
        assert_eq!(log[2].action, "Updated scopes");
    }

    #[test]
    fn empty_seed_starts_empty_log() {
        let trail = AuditTrail::with_clock(stopped());
        let mut document = SessionDocument::new(SessionId::new());

        trail.append_to(&mut document, &DefaultsProvider::new(), "first", None);
        assert_eq!(document.collection::<AuditLog>().unwrap().len(), 1);
    }

    #[test]
    fn appends_preserve_call_order() {
        let store = SessionStore::new(Arc::new(DefaultsProvider::new()));
        let trail = AuditTrail::with_clock(stopped());
        let session = store.provision();

        for action in ["one", "two", "three", "two"] {
            trail.append(&store, &session, action, None);
        }

        let actions: Vec<String> = store
            .snapshot(&session)
            .and_then(|d| d.collection::<AuditLog>().map(<[AuditEntry]>::to_vec))
            .unwrap()
            .into_iter()
            .map(|e| e.action)
            .collect();
        assert_eq!(actions, ["one", "two", "three", "two"]);
    }
}
