//! Audit categories for configuration changes

use onb_session::fields;
use serde::{Deserialize, Serialize};

/// Kind of configuration change recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditCategory {
    /// `clientName` changed
    ServiceName,
    /// `publicKeyType` changed
    AuthenticationSettings,
    /// `redirectUrls` changed
    RedirectUrls,
    /// `selectedScopes` changed
    Scopes,
}

impl AuditCategory {
    /// Categories in tie-break order; the first present field wins
    pub const PRIORITY: [AuditCategory; 4] = [
        AuditCategory::ServiceName,
        AuditCategory::AuthenticationSettings,
        AuditCategory::RedirectUrls,
        AuditCategory::Scopes,
    ];

    /// Field whose presence triggers this category
    #[inline]
    #[must_use]
    pub fn trigger_field(&self) -> &'static str {
        match self {
            AuditCategory::ServiceName => fields::CLIENT_NAME,
            AuditCategory::AuthenticationSettings => fields::PUBLIC_KEY_TYPE,
            AuditCategory::RedirectUrls => fields::REDIRECT_URLS,
            AuditCategory::Scopes => fields::SELECTED_SCOPES,
        }
    }

    /// Audit log action text
    #[inline]
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            AuditCategory::ServiceName => "Updated service name",
            AuditCategory::AuthenticationSettings => "Updated authentication settings",
            AuditCategory::RedirectUrls => "Updated redirect URLs",
            AuditCategory::Scopes => "Updated scopes",
        }
    }
}

impl std::fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.action())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_follows_trigger_order() {
        let triggers: Vec<&str> = AuditCategory::PRIORITY.iter().map(AuditCategory::trigger_field).collect();
        assert_eq!(triggers, ["clientName", "publicKeyType", "redirectUrls", "selectedScopes"]);
    }

    #[test]
    fn display_is_action_text() {
        assert_eq!(AuditCategory::AuthenticationSettings.to_string(), "Updated authentication settings");
    }
}
