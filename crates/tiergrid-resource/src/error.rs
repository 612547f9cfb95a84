//! Error types for resource accounting.

use thiserror::Error;

use crate::kind::ResourceKind;

/// Result type alias for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors that can occur when comparing, combining, or constructing
/// resource descriptors.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Two descriptors of different kinds were compared or combined.
    #[error("mismatched resource kinds: expected {expected}, found {found}")]
    MismatchedKind {
        expected: ResourceKind,
        found: ResourceKind,
    },

    /// A descriptor was constructed from a non-numeric magnitude.
    #[error("malformed {kind} value {raw:?}: {source}")]
    MalformedValue {
        kind: ResourceKind,
        raw: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A resource kind name that is not part of the enumeration.
    #[error("unknown resource kind: {0:?}")]
    UnknownKind(String),
}
