//! Error types for the onboarding service
//!
//! Only conditions the boundary must act on are errors:
//! - Missing session context
//! - Missing sign-in on pages that need an actor
//! - Unreadable configuration
//!
//! Rejected mutations are reported as outcomes, not errors.

use onb_session::SessionError;

/// Main onboarding error type
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    /// Session state error
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Operation needs a signed-in actor
    #[error("sign-in required")]
    NotSignedIn,

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    /// Configuration could not be read
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl OnboardingError {
    /// Check if the boundary should redirect to sign-in
    #[inline]
    #[must_use]
    pub fn requires_sign_in(&self) -> bool {
        match self {
            Self::NotSignedIn => true,
            Self::Session(err) => err.is_missing_session(),
            Self::InvalidConfig(_) | Self::Io(_) => false,
        }
    }
}
