//! Onboarding Team Management
//!
//! Session-scoped team membership:
//! - Invite members (append to an ordered collection)
//! - Remove members by position
//! - Protect the signed-in actor's own entry from removal
//!
//! Invalid mutations are not errors. They come back as
//! [`MutationOutcome::Ignored`] and leave the session untouched.
//!
//! # Example
//!
//! ```rust
//! use onb_session::{fields, DefaultsProvider, SessionStore};
//! use onb_team::TeamMutator;
//! use std::sync::Arc;
//!
//! let store = SessionStore::new(Arc::new(DefaultsProvider::new()));
//! let session = store.provision();
//! store.set(&session, fields::USER_EMAIL, "alice@gov.uk");
//!
//! let team = TeamMutator::default();
//! team.list(&store, &session);
//! assert!(team.invite(&store, &session, "bob@gov.uk", "Editor").is_applied());
//! assert!(!team.remove(&store, &session, 0).is_applied());
//! assert!(team.remove(&store, &session, 1).is_applied());
//! ```

#![warn(missing_docs)]

pub mod collection;
pub mod mutator;
pub mod outcome;

// Re-exports
pub use collection::{append, remove_at, Protected};
pub use mutator::{TeamMutator, DEFAULT_SELF_ROLE};
pub use outcome::{IgnoreReason, MutationOutcome};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
