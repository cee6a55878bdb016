//! Sign-in outcome and email check
//!
//! The check is a prototype gate, not authentication: any address that
//! contains the configured domain is accepted.

use serde::Serialize;

/// Message shown when the email is rejected
pub const SIGN_IN_ERROR: &str = "Enter a government email address";

/// Result of a sign-in attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignInOutcome {
    /// Email accepted; the session now has an actor
    Accepted {
        /// Signed-in actor
        actor: String,
    },
    /// Email rejected; session unchanged
    Rejected {
        /// Field error for the form
        message: String,
    },
}

impl SignInOutcome {
    /// Check if sign-in succeeded
    #[inline]
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Check an email against the sign-in domain
#[inline]
#[must_use]
pub fn is_government_email(email: &str, domain: &str) -> bool {
    !email.is_empty() && email.contains(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_domain_substring() {
        assert!(is_government_email("alice@digital.gov.uk", "gov.uk"));
        assert!(!is_government_email("alice@example.com", "gov.uk"));
        assert!(!is_government_email("", "gov.uk"));
    }
}
