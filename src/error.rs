//! Error types for dashboard composition
//!
//! Every variant is scoped to a single resource: the dispatcher logs it,
//! records the resource as skipped and moves on to the next one.

use thiserror::Error;

/// Resource-scoped composition error
#[derive(Debug, Error)]
pub enum Error {
    /// Identifier string does not have the segments a builder needs
    #[error("Malformed identifier '{identifier}': {reason}")]
    MalformedIdentifier { identifier: String, reason: String },

    /// A field the builder cannot do without is absent
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Descriptor sub-structure has the wrong shape
    #[error("Invalid resource descriptor: {0}")]
    InvalidDescriptor(#[from] serde_json::Error),
}

impl Error {
    pub fn malformed(identifier: &str, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for composition operations
pub type Result<T> = std::result::Result<T, Error>;
