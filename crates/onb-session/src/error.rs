//! Error types for session state

/// Session state errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Request arrived without a session identity
    #[error("no session context for request")]
    NoSessionContext,

    /// Defaults seed could not be parsed
    #[error("invalid defaults seed: {0}")]
    InvalidDefaults(#[from] toml::de::Error),

    /// Defaults seed could not be read
    #[error("failed to read defaults seed: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// Check if the boundary should send the user back to sign-in
    #[inline]
    #[must_use]
    pub fn is_missing_session(&self) -> bool {
        matches!(self, Self::NoSessionContext)
    }
}
