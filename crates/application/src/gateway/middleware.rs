//! Request and response middleware.
//!
//! The gateway runs every outbound request through its request chain and
//! every received response through its response chain, in registration
//! order. Each middleware is a plain value, so it can be exercised without a
//! transport.

use std::sync::Arc;

use replydesk_domain::request::{APPLICATION_JSON, AUTHORIZATION, CONTENT_TYPE};
use replydesk_domain::{ApiRequest, ApiResponse, HttpMethod, bearer_header};

use crate::auth::CredentialReader;
use crate::gateway::GatewayError;

/// Transforms a request before it is sent.
pub trait RequestMiddleware: Send + Sync {
    /// Returns the request to pass on.
    fn on_request(&self, request: ApiRequest) -> ApiRequest;
}

/// Inspects or transforms a response after it is received.
pub trait ResponseMiddleware: Send + Sync {
    /// Returns the response to pass on, or an error to surface instead.
    ///
    /// # Errors
    ///
    /// Implementations return an error to stop the chain.
    fn on_response(
        &self,
        request: &ApiRequest,
        response: ApiResponse,
    ) -> Result<ApiResponse, GatewayError>;
}

/// Sets `Content-Type: application/json` unless the request already has one.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonContentType;

impl RequestMiddleware for JsonContentType {
    fn on_request(&self, mut request: ApiRequest) -> ApiRequest {
        if request.header(CONTENT_TYPE).is_none() {
            request.set_header(CONTENT_TYPE, APPLICATION_JSON);
        }
        request
    }
}

/// Attaches the stored bearer token, if there is one.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    credentials: CredentialReader,
}

impl BearerAuth {
    /// Creates the middleware over a read-only credential view.
    #[must_use]
    pub const fn new(credentials: CredentialReader) -> Self {
        Self { credentials }
    }
}

impl RequestMiddleware for BearerAuth {
    fn on_request(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(token) = self.credentials.token() {
            request.set_header(AUTHORIZATION, bearer_header(&token));
        }
        request
    }
}

/// Signal raised when the server answers 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unauthorized {
    /// Method of the rejected request.
    pub method: HttpMethod,
    /// Path of the rejected request.
    pub path: String,
    /// Server-provided detail, if any.
    pub detail: Option<String>,
}

/// Reacts to an unauthorized signal.
pub trait UnauthorizedListener: Send + Sync {
    /// Called once per 401 response, before the error reaches the caller.
    fn on_unauthorized(&self, signal: &Unauthorized);
}

/// Turns every 401 into an `Unauthorized` signal and error.
///
/// Listeners run in registration order. Register the session authority
/// before the navigation listener so the session is already anonymous when
/// the login screen is shown. Every other status passes through untouched.
///
/// This fires for 401s from any endpoint, including `/api/auth/login` with
/// bad credentials. Against an already anonymous session that is harmless,
/// but an endpoint that ever needs 401 without meaning "end this session"
/// would need an exemption here.
#[derive(Clone, Default)]
pub struct UnauthorizedGuard {
    listeners: Vec<Arc<dyn UnauthorizedListener>>,
}

impl std::fmt::Debug for UnauthorizedGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnauthorizedGuard")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl UnauthorizedGuard {
    /// Creates a guard with no listeners.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds a listener after the existing ones.
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn UnauthorizedListener>) -> Self {
        self.listeners.push(listener);
        self
    }
}

impl ResponseMiddleware for UnauthorizedGuard {
    fn on_response(
        &self,
        request: &ApiRequest,
        response: ApiResponse,
    ) -> Result<ApiResponse, GatewayError> {
        if !response.status.is_unauthorized() {
            return Ok(response);
        }

        let signal = Unauthorized {
            method: request.method,
            path: request.path.clone(),
            detail: response.detail(),
        };
        tracing::debug!(method = %signal.method, path = %signal.path, "received 401");
        for listener in &self.listeners {
            listener.on_unauthorized(&signal);
        }

        Err(GatewayError::Unauthorized {
            detail: signal.detail,
        })
    }
}
