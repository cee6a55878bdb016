//! Request context supplied by the boundary

use onb_session::{SessionError, SessionId};

/// What the boundary knows about an inbound request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    session: Option<SessionId>,
}

impl RequestContext {
    /// Context for a request carrying a session identity
    #[inline]
    #[must_use]
    pub fn for_session(session: SessionId) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Context for a request without a session
    #[inline]
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Resolved session identity
    ///
    /// # Errors
    /// Returns `SessionError::NoSessionContext` if the request has no session
    #[inline]
    pub fn session_id(&self) -> Result<SessionId, SessionError> {
        self.session.ok_or(SessionError::NoSessionContext)
    }
}

impl From<SessionId> for RequestContext {
    fn from(session: SessionId) -> Self {
        Self::for_session(session)
    }
}
