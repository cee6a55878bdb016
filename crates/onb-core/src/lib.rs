//! Onboarding Core
//!
//! The service the request-handling boundary talks to. It ties together:
//! - Session state with copy-on-write defaults (`onb-session`)
//! - Team roster mutations (`onb-team`)
//! - Configuration change auditing (`onb-intercept`)
//!
//! # Example
//!
//! ```rust
//! use onb_core::prelude::*;
//!
//! # fn example() -> Result<(), OnboardingError> {
//! let service = OnboardingService::new(OnboardingConfig::new(), DefaultsProvider::builtin());
//! let ctx = service.start_session();
//!
//! service.sign_in(&ctx, "alice@gov.uk")?;
//! service.team_members(&ctx)?;
//! service.invite_member(&ctx, "bob@gov.uk", "Editor")?;
//!
//! let view = service.view(&ctx)?;
//! assert_eq!(view.team_members.len(), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod error;
pub mod service;
pub mod sign_in;

// Re-exports for convenience
pub use config::OnboardingConfig;
pub use context::RequestContext;
pub use error::OnboardingError;
pub use onb_intercept::{AuditCategory, ConfigMutationInterceptor, ConfigUpdate};
pub use onb_session::{
    fields, AuditEntry, Clock, DefaultsProvider, Environment, FieldValue, SessionId, SessionView, TeamMember,
};
pub use onb_team::{IgnoreReason, MutationOutcome};
pub use service::OnboardingService;
pub use sign_in::{SignInOutcome, SIGN_IN_ERROR};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the onboarding service
    pub use crate::{
        fields, AuditEntry, ConfigUpdate, DefaultsProvider, Environment, FieldValue, MutationOutcome,
        OnboardingConfig, OnboardingError, OnboardingService, RequestContext, SessionView, SignInOutcome,
        TeamMember,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
