//! Application error types

use replydesk_domain::DomainError;
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::ports::StorageError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A call through the gateway failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The credential could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApplicationError {
    /// Message suitable for showing next to a form.
    ///
    /// Prefers the server-provided detail when there is one.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Gateway(err) => err
                .detail()
                .map_or_else(|| err.to_string(), ToString::to_string),
            other => other.to_string(),
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
