//! Ordered collection operations
//!
//! Positions are the only handle callers get: removal shifts every later
//! entry down by one, so an index is only meaningful against the list it
//! was read from.

use crate::outcome::IgnoreReason;
use onb_session::TeamMember;

/// Entries that must never be removed
pub trait Protected {
    /// Check if the entry is protected from removal
    fn is_protected(&self) -> bool;
}

impl Protected for TeamMember {
    #[inline]
    fn is_protected(&self) -> bool {
        self.is_self
    }
}

/// Append to the end, returning the new entry's position
#[inline]
pub fn append<T>(items: &mut Vec<T>, item: T) -> usize {
    items.push(item);
    items.len() - 1
}

/// Remove the entry at `index` unless it is out of range or protected
///
/// # Errors
/// - `IgnoreReason::IndexOutOfRange` if `index >= items.len()`
/// - `IgnoreReason::ProtectedEntry` if the entry is protected
pub fn remove_at<T: Protected>(items: &mut Vec<T>, index: usize) -> Result<T, IgnoreReason> {
    match items.get(index) {
        None => Err(IgnoreReason::IndexOutOfRange {
            index,
            len: items.len(),
        }),
        Some(item) if item.is_protected() => Err(IgnoreReason::ProtectedEntry { index }),
        Some(_) => Ok(items.remove(index)),
    }
}
