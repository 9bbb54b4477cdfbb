//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A role name did not match any known role.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// A credential record was missing one of its halves or had an empty token.
    #[error("incomplete credential: {0}")]
    IncompleteCredential(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
