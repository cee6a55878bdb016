//! Onboarding Configuration Audit
//!
//! Classifies service configuration updates into a single audit category
//! and records it. The field writes themselves are a plain pass-through
//! performed by the caller.

#![warn(missing_docs)]

pub mod category;
pub mod interceptor;

// Re-exports
pub use category::AuditCategory;
pub use interceptor::{ConfigMutationInterceptor, ConfigUpdate};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
