//! Error types for network construction.

use thiserror::Error;

/// Result type alias for network operations.
pub type NetResult<T> = Result<T, NetError>;

/// Errors that can occur while establishing links.
#[derive(Debug, Error)]
pub enum NetError {
    /// A link referenced an endpoint the network does not contain.
    #[error("unknown network member: {0}")]
    UnknownMember(String),

    /// A link referenced the same endpoint twice.
    #[error("cannot link {0} to itself")]
    SelfLink(String),
}
