//! Results of permissive mutations

use onb_session::AuditEntry;
use serde::Serialize;

/// Why a mutation was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Invite without an email
    MissingEmail,
    /// Invite without a role
    MissingRole,
    /// Removal index past the end of the collection
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Collection length at the time of the request
        len: usize,
    },
    /// Removal targeted a protected entry
    ProtectedEntry {
        /// Requested position
        index: usize,
    },
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEmail => write!(f, "email is required"),
            Self::MissingRole => write!(f, "role is required"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} entries")
            }
            Self::ProtectedEntry { index } => write!(f, "entry {index} is protected"),
        }
    }
}

/// Result of a mutation that never fails loudly
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MutationOutcome {
    /// Change applied and audited
    Applied {
        /// Audit entry recorded for the change
        entry: AuditEntry,
    },
    /// No change made
    Ignored {
        /// Why the request was dropped
        #[serde(flatten)]
        reason: IgnoreReason,
    },
}

impl MutationOutcome {
    /// Check if the change was applied
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Audit entry, if applied
    #[inline]
    #[must_use]
    pub fn entry(&self) -> Option<&AuditEntry> {
        match self {
            Self::Applied { entry } => Some(entry),
            Self::Ignored { .. } => None,
        }
    }

    /// Ignore reason, if ignored
    #[inline]
    #[must_use]
    pub fn ignored_reason(&self) -> Option<IgnoreReason> {
        match self {
            Self::Applied { .. } => None,
            Self::Ignored { reason } => Some(*reason),
        }
    }
}

impl From<IgnoreReason> for MutationOutcome {
    fn from(reason: IgnoreReason) -> Self {
        Self::Ignored { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_display() {
        let reason = IgnoreReason::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(reason.to_string(), "index 4 out of range for 2 entries");
    }

    #[test]
    fn outcome_accessors() {
        let ignored = MutationOutcome::from(IgnoreReason::MissingRole);
        assert!(!ignored.is_applied());
        assert!(ignored.entry().is_none());
        assert_eq!(ignored.ignored_reason(), Some(IgnoreReason::MissingRole));

        let applied = MutationOutcome::Applied {
            entry: AuditEntry::new("Removed team member bob", None, "10 Feb 2026, 10:00"),
        };
        assert!(applied.is_applied());
        assert_eq!(applied.ignored_reason(), None);
    }
}
