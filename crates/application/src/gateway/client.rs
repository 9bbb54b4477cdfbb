//! The gateway client: the one way pages reach the API.

use std::sync::Arc;

use replydesk_domain::{ApiRequest, ApiResponse};
use serde::de::DeserializeOwned;

use crate::auth::CredentialReader;
use crate::gateway::middleware::{
    BearerAuth, JsonContentType, RequestMiddleware, ResponseMiddleware, UnauthorizedGuard,
    UnauthorizedListener,
};
use crate::gateway::GatewayError;
use crate::ports::HttpTransport;

/// Dispatches requests through the middleware chains and a transport.
pub struct GatewayClient<T> {
    transport: T,
    request_chain: Vec<Arc<dyn RequestMiddleware>>,
    response_chain: Vec<Arc<dyn ResponseMiddleware>>,
}

impl<T> std::fmt::Debug for GatewayClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("request_chain", &self.request_chain.len())
            .field("response_chain", &self.response_chain.len())
            .finish_non_exhaustive()
    }
}

impl<T: HttpTransport> GatewayClient<T> {
    /// Creates a client with empty middleware chains.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            request_chain: Vec::new(),
            response_chain: Vec::new(),
        }
    }

    /// Creates a client with the standard chains.
    ///
    /// Requests get a JSON content type and the stored bearer token.
    /// Responses go through an [`UnauthorizedGuard`] that notifies
    /// `listeners` in the given order.
    #[must_use]
    pub fn standard(
        transport: T,
        credentials: CredentialReader,
        listeners: impl IntoIterator<Item = Arc<dyn UnauthorizedListener>>,
    ) -> Self {
        let guard = listeners
            .into_iter()
            .fold(UnauthorizedGuard::new(), UnauthorizedGuard::with_listener);

        Self::new(transport)
            .with_request_middleware(JsonContentType)
            .with_request_middleware(BearerAuth::new(credentials))
            .with_response_middleware(guard)
    }

    /// Appends a request middleware.
    #[must_use]
    pub fn with_request_middleware(mut self, middleware: impl RequestMiddleware + 'static) -> Self {
        self.request_chain.push(Arc::new(middleware));
        self
    }

    /// Appends a response middleware.
    #[must_use]
    pub fn with_response_middleware(
        mut self,
        middleware: impl ResponseMiddleware + 'static,
    ) -> Self {
        self.response_chain.push(Arc::new(middleware));
        self
    }

    /// Sends a request and returns whatever response came back.
    ///
    /// Non-2xx responses other than 401 are returned as `Ok`; use
    /// [`send_checked`](Self::send_checked) to turn them into errors.
    ///
    /// # Errors
    ///
    /// - `GatewayError::Transport` if no response was received
    /// - any error a response middleware raises, e.g. `Unauthorized`
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        let request = self
            .request_chain
            .iter()
            .fold(request, |request, middleware| middleware.on_request(request));

        tracing::debug!(method = %request.method, path = %request.path, "dispatching request");

        let mut response = self.transport.execute(&request).await.map_err(|e| {
            tracing::debug!(path = %request.path, error = %e, "no response received");
            GatewayError::Transport(e)
        })?;

        for middleware in &self.response_chain {
            response = middleware.on_response(&request, response)?;
        }
        Ok(response)
    }

    /// Sends a request and fails on any non-2xx status.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send), plus `GatewayError::Api` for other non-2xx
    /// statuses, carrying the server's `detail`.
    pub async fn send_checked(&self, request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        let response = self.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(GatewayError::Api {
                status: response.status,
                detail: response.detail(),
            })
        }
    }

    /// Sends a request and decodes a 2xx JSON body.
    ///
    /// # Errors
    ///
    /// As [`send_checked`](Self::send_checked), plus `GatewayError::Decode`
    /// if the body does not match `R`.
    pub async fn send_json<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<R, GatewayError> {
        let response = self.send_checked(request).await?;
        if response.body.is_empty() {
            return serde_json::from_str("null").map_err(|e| GatewayError::Decode(e.to_string()));
        }
        response
            .body_json()
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::auth::{CredentialStore, SessionAuthority};
    use crate::ports::TransportError;
    use crate::testing::{MemoryKv, ScriptedTransport};
    use pretty_assertions::assert_eq;
    use replydesk_domain::{Role, SessionPhase, StatusCode, UserProfile};
    use serde_json::json;

    struct Fixture {
        kv: Arc<MemoryKv>,
        transport: Arc<ScriptedTransport>,
        session: Arc<SessionAuthority>,
        gateway: GatewayClient<Arc<ScriptedTransport>>,
    }

    fn fixture() -> Fixture {
        let kv = Arc::new(MemoryKv::default());
        let session = Arc::new(SessionAuthority::restored(CredentialStore::new(kv.clone())));
        let transport = Arc::new(ScriptedTransport::default());
        let listener: Arc<dyn UnauthorizedListener> = session.clone();
        let gateway =
            GatewayClient::standard(transport.clone(), session.credentials(), [listener]);
        Fixture {
            kv,
            transport,
            session,
            gateway,
        }
    }

    fn sign_in(session: &SessionAuthority) {
        session
            .login_success(UserProfile::new("u-1", "a@b.co", Role::User), "tok-1")
            .unwrap();
    }

    #[tokio::test]
    async fn test_request_carries_token_and_content_type() {
        let f = fixture();
        sign_in(&f.session);
        f.transport.respond_json(200, &json!([]));

        f.gateway.send(ApiRequest::get("/api/leads")).await.unwrap();

        let sent = f.transport.last_sent();
        assert_eq!(sent.header("authorization"), Some("Bearer tok-1"));
        assert_eq!(sent.header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_anonymous_request_is_sent_without_token() {
        let f = fixture();
        f.transport.respond_json(200, &json!({}));

        f.gateway.send(ApiRequest::get("/api/leads")).await.unwrap();

        assert_eq!(f.transport.last_sent().header("authorization"), None);
    }

    #[tokio::test]
    async fn test_401_deauthorizes_before_error_surfaces() {
        let f = fixture();
        sign_in(&f.session);
        f.transport
            .respond_json(401, &json!({"detail": "Could not validate credentials"}));

        let err = f
            .gateway
            .send(ApiRequest::get("/api/conversations"))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Unauthorized { .. }));
        assert_eq!(f.session.phase(), SessionPhase::Anonymous);
        assert!(f.kv.is_empty());
        assert_eq!(f.transport.sent().len(), 1, "401 must not be retried");
    }

    #[tokio::test]
    async fn test_concurrent_401s_end_in_same_state() {
        let f = fixture();
        sign_in(&f.session);
        f.transport.respond_json(401, &json!({"detail": "expired"}));
        f.transport.respond_json(401, &json!({"detail": "expired"}));

        let (a, b) = tokio::join!(
            f.gateway.send(ApiRequest::get("/api/leads")),
            f.gateway.send(ApiRequest::get("/api/notifications")),
        );

        assert!(a.is_err() && b.is_err());
        assert_eq!(f.session.session(), replydesk_domain::Session::anonymous());
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_session() {
        let f = fixture();
        sign_in(&f.session);
        f.transport.fail(TransportError::Timeout { timeout_ms: 30_000 });

        let err = f
            .gateway
            .send(ApiRequest::get("/api/leads"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::Transport(TransportError::Timeout { timeout_ms: 30_000 })
        );
        assert_eq!(f.session.phase(), SessionPhase::Authenticated);
        assert!(!f.kv.is_empty());
    }

    #[tokio::test]
    async fn test_other_errors_pass_through_send_and_fail_send_checked() {
        let f = fixture();
        sign_in(&f.session);
        f.transport.respond_json(403, &json!({"detail": "Admin only"}));
        f.transport.respond_json(403, &json!({"detail": "Admin only"}));

        let raw = f
            .gateway
            .send(ApiRequest::get("/api/admin/users"))
            .await
            .unwrap();
        assert_eq!(raw.status, StatusCode::FORBIDDEN);

        let err = f
            .gateway
            .send_checked(ApiRequest::get("/api/admin/users"))
            .await
            .unwrap_err();
        assert_eq!(err.detail(), Some("Admin only"));
        assert_eq!(f.session.phase(), SessionPhase::Authenticated);
    }

    #[tokio::test]
    async fn test_send_json_decodes_body() {
        let f = fixture();
        f.transport
            .respond_json(200, &json!({"items": [1, 2, 3], "total": 3}));

        let body: serde_json::Value = f
            .gateway
            .send_json(ApiRequest::get("/api/leads"))
            .await
            .unwrap();

        assert_eq!(body["total"], 3);
    }

    #[tokio::test]
    async fn test_send_json_reports_shape_mismatch() {
        let f = fixture();
        f.transport.respond_json(200, &json!({"unexpected": true}));

        let err = f
            .gateway
            .send_json::<Vec<String>>(ApiRequest::get("/api/leads"))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Decode(_)));
    }
}
