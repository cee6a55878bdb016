//! Per-session document store
//!
//! Each session owns one document behind its own lock; the map of sessions
//! is a `DashMap`, so different sessions never contend with each other.
//! All mutations of one session run inside [`SessionStore::with_document`]
//! and therefore observe a consistent snapshot for their whole duration.

use crate::defaults::{DefaultsProvider, Environment};
use crate::document::{SessionCollection, SessionDocument, SessionView};
use crate::types::{FieldValue, SessionId};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Stored document plus lifecycle bookkeeping
#[derive(Debug)]
struct SessionEntry {
    document: SessionDocument,
    last_touched: Instant,
    /// Set under the lock when the entry leaves the map
    evicted: bool,
}

impl SessionEntry {
    fn new(id: SessionId) -> Self {
        Self {
            document: SessionDocument::new(id),
            last_touched: Instant::now(),
            evicted: false,
        }
    }
}

/// Owns one mutable document per session identity
#[derive(Debug)]
pub struct SessionStore {
    /// Shared read-only seed
    defaults: Arc<DefaultsProvider>,
    /// Live sessions
    sessions: DashMap<SessionId, Arc<Mutex<SessionEntry>>>,
}

impl SessionStore {
    /// Create empty store over a defaults seed
    #[inline]
    #[must_use]
    pub fn new(defaults: Arc<DefaultsProvider>) -> Self {
        Self {
            defaults,
            sessions: DashMap::new(),
        }
    }

    /// Shared defaults seed
    #[inline]
    #[must_use]
    pub fn defaults(&self) -> &DefaultsProvider {
        &self.defaults
    }

    /// Create a fresh session and return its identity
    pub fn provision(&self) -> SessionId {
        let id = SessionId::new();
        self.sessions.insert(id, Arc::new(Mutex::new(SessionEntry::new(id))));
        tracing::info!(session = %id, "Session provisioned");
        id
    }

    /// Whether a document exists for the session
    #[inline]
    #[must_use]
    pub fn contains(&self, session: &SessionId) -> bool {
        self.sessions.contains_key(session)
    }

    /// Number of live sessions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are live
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Existing entry, without creating one
    fn existing(&self, session: &SessionId) -> Option<Arc<Mutex<SessionEntry>>> {
        self.sessions.get(session).map(|entry| Arc::clone(entry.value()))
    }

    /// Entry for the session, created on first write
    fn entry(&self, session: &SessionId) -> Arc<Mutex<SessionEntry>> {
        // Clone the Arc out so the shard guard is released before locking.
        let entry = self
            .sessions
            .entry(*session)
            .or_insert_with(|| {
                tracing::debug!(session = %session, "Session document created on write");
                Arc::new(Mutex::new(SessionEntry::new(*session)))
            });
        Arc::clone(entry.value())
    }

    /// Run a mutation under the session's lock
    ///
    /// Creates the document if it does not exist. If the entry is cleared or
    /// evicted between lookup and locking, the lookup is retried so the
    /// mutation always lands on the document the map holds.
    pub fn with_document<R>(
        &self,
        session: &SessionId,
        mutate: impl FnOnce(&mut SessionDocument, &DefaultsProvider) -> R,
    ) -> R {
        loop {
            let entry = self.entry(session);
            let mut guard = entry.lock();
            if guard.evicted {
                tracing::debug!(session = %session, "Session evicted before lock; retrying");
                continue;
            }
            guard.last_touched = Instant::now();
            return mutate(&mut guard.document, &self.defaults);
        }
    }

    /// Run a read under the session's lock
    ///
    /// Reads never create a document; an unknown or evicted session reads as
    /// a fresh, empty one.
    pub fn read<R>(
        &self,
        session: &SessionId,
        inspect: impl FnOnce(&SessionDocument, &DefaultsProvider) -> R,
    ) -> R {
        while let Some(entry) = self.existing(session) {
            let mut guard = entry.lock();
            if guard.evicted {
                continue;
            }
            guard.last_touched = Instant::now();
            return inspect(&guard.document, &self.defaults);
        }
        inspect(&SessionDocument::new(*session), &self.defaults)
    }

    /// Session value of a field, else its default
    #[must_use]
    pub fn get(&self, session: &SessionId, field: &str) -> Option<FieldValue> {
        self.read(session, |document, defaults| document.resolve(defaults, field).cloned())
    }

    /// Session value of a field in an environment, else its default
    #[must_use]
    pub fn get_for(&self, session: &SessionId, env: Environment, field: &str) -> Option<FieldValue> {
        self.read(session, |document, defaults| {
            document.resolve_for(defaults, env, field).cloned()
        })
    }

    /// Overwrite a field
    pub fn set(&self, session: &SessionId, field: impl Into<String>, value: impl Into<FieldValue>) {
        let field = field.into();
        let value = value.into();
        self.with_document(session, |document, _| {
            tracing::debug!(session = %session, field = %field, "Field set");
            document.set(field, value);
        });
    }

    /// Seed a collection via `seed` if absent
    ///
    /// Returns true if this call seeded the collection.
    pub fn ensure_collection<C, F>(&self, session: &SessionId, seed: F) -> bool
    where
        C: SessionCollection,
        F: FnOnce(&SessionDocument) -> Vec<C::Item>,
    {
        self.with_document(session, |document, _| {
            let seeded = document.ensure_collection::<C, F>(seed);
            if seeded {
                tracing::debug!(session = %session, collection = C::NAME, "Collection seeded");
            }
            seeded
        })
    }

    /// Copy of the session's own document
    #[must_use]
    pub fn snapshot(&self, session: &SessionId) -> Option<SessionDocument> {
        self.existing(session).map(|entry| {
            let guard = entry.lock();
            guard.document.clone()
        })
    }

    /// Effective state for rendering
    #[must_use]
    pub fn view(&self, session: &SessionId) -> SessionView {
        self.read(session, |document, defaults| document.view(defaults))
    }

    /// Discard a session's document
    pub fn clear(&self, session: &SessionId) -> bool {
        match self.sessions.remove(session) {
            Some((_, entry)) => {
                entry.lock().evicted = true;
                tracing::info!(session = %session, "Session cleared");
                true
            }
            None => false,
        }
    }

    /// Discard sessions untouched for longer than `max_idle`
    ///
    /// Returns the number of sessions evicted.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| {
            let mut guard = entry.lock();
            let idle = now.saturating_duration_since(guard.last_touched) > max_idle;
            guard.evicted = idle;
            !idle
        });
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            tracing::info!(evicted, "Idle sessions evicted");
        }
        evicted
    }
}
