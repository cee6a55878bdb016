//! Onboarding Session State
//!
//! Session-scoped documents for the onboarding walkthrough.
//!
//! # Overview
//!
//! - **DefaultsProvider**: read-only seed shared by every session
//! - **SessionDocument**: one mutable document per session identity
//! - **SessionStore**: per-session serialized access to documents
//! - **AuditTrail**: append-only log embedded in each document
//!
//! Reads fall through to the defaults without touching the session.
//! Writes materialize the field into the session, after which the
//! session's own value always wins.
//!
//! # Example
//!
//! ```rust
//! use onb_session::{fields, DefaultsProvider, FieldValue, SessionStore};
//! use std::sync::Arc;
//!
//! let store = SessionStore::new(Arc::new(DefaultsProvider::builtin()));
//! let session = store.provision();
//!
//! assert_eq!(
//!     store.get(&session, fields::CLIENT_ID),
//!     Some(FieldValue::from("INTEG-883920"))
//! );
//!
//! store.set(&session, fields::CLIENT_ID, "X");
//! assert_eq!(store.get(&session, fields::CLIENT_ID), Some(FieldValue::from("X")));
//! ```

#![warn(missing_docs)]

pub mod audit;
pub mod defaults;
pub mod document;
pub mod error;
pub mod store;
pub mod types;

// Re-exports
pub use audit::{AuditTrail, Clock, SystemClock, DEFAULT_DATE_FORMAT};
pub use defaults::{DefaultsProvider, Environment};
pub use document::{AuditLog, SessionCollection, SessionDocument, SessionView, TeamMembers};
pub use error::SessionError;
pub use store::SessionStore;
pub use types::{fields, AuditEntry, FieldValue, SessionId, TeamMember};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for session state
    pub use crate::{
        fields, AuditEntry, AuditTrail, DefaultsProvider, Environment, FieldValue, SessionDocument,
        SessionError, SessionId, SessionStore, SessionView, TeamMember,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
