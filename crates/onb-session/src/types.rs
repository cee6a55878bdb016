//! Core types for session state
//!
//! Defines the values stored in a session document:
//! - Session identities
//! - Field values (text or ordered list)
//! - Team member and audit log records

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Well-known field names
pub mod fields {
    /// Signed-in actor's email
    pub const USER_EMAIL: &str = "userEmail";
    /// Display name of the service
    pub const SERVICE_NAME: &str = "serviceName";
    /// Client name registered with the identity provider
    pub const CLIENT_NAME: &str = "clientName";
    /// Client identifier
    pub const CLIENT_ID: &str = "clientId";
    /// Authentication key type
    pub const PUBLIC_KEY_TYPE: &str = "publicKeyType";
    /// Callback URLs
    pub const REDIRECT_URLS: &str = "redirectUrls";
    /// Granted scopes
    pub const SCOPES: &str = "scopes";
    /// Scopes picked on the configuration form
    pub const SELECTED_SCOPES: &str = "selectedScopes";
    /// Team member collection
    pub const TEAM_MEMBERS: &str = "teamMembers";
    /// Audit log collection
    pub const AUDIT_LOG: &str = "auditLog";
    /// Prefix of the production variant of a field
    pub const PRODUCTION_PREFIX: &str = "prod_";
}

/// Opaque session identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate new session ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Value stored under a field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Single string
    Text(String),
    /// Ordered sequence of strings
    List(Vec<String>),
}

impl FieldValue {
    /// Text content, if this is a text value
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    /// List content, if this is a list value
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// True for empty text or an empty list
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<&[&str]> for FieldValue {
    fn from(items: &[&str]) -> Self {
        Self::List(items.iter().map(ToString::to_string).collect())
    }
}

/// Team member record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// Member email
    pub email: String,
    /// Assigned role
    pub role: String,
    /// Whether this entry is the signed-in actor
    pub is_self: bool,
}

impl TeamMember {
    /// Create an invited (non-self) member
    #[inline]
    pub fn invited(email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: role.into(),
            is_self: false,
        }
    }

    /// Create the self entry
    #[inline]
    pub fn self_entry(email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: role.into(),
            is_self: true,
        }
    }
}

/// One state-changing action, its actor and its time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Human-readable action
    pub action: String,
    /// Actor identity (none before sign-in)
    pub actor: Option<String>,
    /// Formatted capture time
    pub date: String,
}

impl AuditEntry {
    /// Create new audit entry
    #[inline]
    pub fn new(
        action: impl Into<String>,
        actor: Option<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            actor,
            date: date.into(),
        }
    }
}
