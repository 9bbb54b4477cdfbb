//! Gateway error types

use replydesk_domain::StatusCode;
use thiserror::Error;

use crate::ports::TransportError;

/// Errors returned by calls through the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No response was received. The session is left untouched.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered 401. By the time the caller sees this the session
    /// has already been ended and navigation sent to the login screen.
    #[error("unauthorized{}", detail_suffix(.detail))]
    Unauthorized {
        /// Server-provided detail, if any.
        detail: Option<String>,
    },

    /// The server answered with another non-2xx status.
    #[error("request failed with {status}{}", detail_suffix(.detail))]
    Api {
        /// Response status.
        status: StatusCode,
        /// Server-provided detail, if any.
        detail: Option<String>,
    },

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A 2xx body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map_or_else(String::new, |d| format!(": {d}"))
}

impl GatewayError {
    /// Server-provided detail message, if the error carries one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail } | Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Response status, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this error came from the network layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
