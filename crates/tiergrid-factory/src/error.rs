//! Error types for topology construction.

use thiserror::Error;

/// Result type alias for factory and builder operations.
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Errors that can occur while assembling infrastructures.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// A mandatory configuration option was not provided.
    #[error("missing required configuration option: {0}")]
    MissingRequiredOption(&'static str),

    /// The configured gateway is not one of the configured devices.
    #[error("gateway device {0:?} is not among the configured devices")]
    UnknownGateway(String),
}
