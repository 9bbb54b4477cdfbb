//! Typed facade over the dashboard API endpoints.
//!
//! Auth endpoints are typed; everything else comes back as JSON values.

use replydesk_domain::{ApiRequest, AuthResponse, HttpMethod, LoginRequest, RegisterRequest};
use serde::Serialize;
use serde_json::Value;

use crate::gateway::{GatewayClient, GatewayError};
use crate::ports::HttpTransport;

/// Query parameters as borrowed key/value pairs.
pub type Params<'a> = &'a [(&'a str, &'a str)];

/// Endpoint catalog, dispatched through a [`GatewayClient`].
#[derive(Debug)]
pub struct DashboardApi<T> {
    gateway: GatewayClient<T>,
}

impl<T: HttpTransport> DashboardApi<T> {
    /// Wraps a gateway client.
    #[must_use]
    pub const fn new(gateway: GatewayClient<T>) -> Self {
        Self { gateway }
    }

    /// The underlying gateway, for ad-hoc requests.
    #[must_use]
    pub const fn gateway(&self) -> &GatewayClient<T> {
        &self.gateway
    }

    /// `POST /api/auth/register`
    ///
    /// # Errors
    ///
    /// Returns the gateway error, e.g. `Api` with status 400 when the email
    /// is taken.
    pub async fn register(&self, body: &RegisterRequest) -> Result<AuthResponse, GatewayError> {
        self.gateway
            .send_json(json_request(HttpMethod::Post, "/api/auth/register", body)?)
            .await
    }

    /// `POST /api/auth/login`
    ///
    /// # Errors
    ///
    /// Bad credentials come back as `Unauthorized`.
    pub async fn login(&self, body: &LoginRequest) -> Result<AuthResponse, GatewayError> {
        self.gateway
            .send_json(json_request(HttpMethod::Post, "/api/auth/login", body)?)
            .await
    }

    /// `GET /api/conversations`
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn list_conversations(&self, params: Params<'_>) -> Result<Value, GatewayError> {
        self.get("/api/conversations", params).await
    }

    /// `GET /api/conversations/{id}`
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for an unusable id, otherwise the gateway
    /// error.
    pub async fn get_conversation(&self, id: &str) -> Result<Value, GatewayError> {
        let path = format!("/api/conversations/{}", segment(id)?);
        self.get(&path, &[]).await
    }

    /// `GET /api/leads`
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn list_leads(&self, params: Params<'_>) -> Result<Value, GatewayError> {
        self.get("/api/leads", params).await
    }

    /// `PATCH /api/leads/{id}`
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for an unusable id, otherwise the gateway
    /// error.
    pub async fn update_lead(&self, id: &str, body: &Value) -> Result<Value, GatewayError> {
        let path = format!("/api/leads/{}", segment(id)?);
        self.send(json_request(HttpMethod::Patch, &path, body)?).await
    }

    /// `GET /api/leads/export/csv`, returning the raw file bytes.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn export_leads_csv(&self) -> Result<Vec<u8>, GatewayError> {
        let response = self
            .gateway
            .send_checked(ApiRequest::get("/api/leads/export/csv"))
            .await?;
        Ok(response.body)
    }

    /// `GET /api/settings/conversation-flow`
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn get_conversation_flow(&self) -> Result<Value, GatewayError> {
        self.get("/api/settings/conversation-flow", &[]).await
    }

    /// `PATCH /api/settings/conversation-flow`
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn update_conversation_flow(&self, body: &Value) -> Result<Value, GatewayError> {
        self.send(json_request(
            HttpMethod::Patch,
            "/api/settings/conversation-flow",
            body,
        )?)
        .await
    }

    /// `GET /api/notifications`
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn list_notifications(&self, params: Params<'_>) -> Result<Value, GatewayError> {
        self.get("/api/notifications", params).await
    }

    /// `POST /api/notifications/{id}/read`
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for an unusable id, otherwise the gateway
    /// error.
    pub async fn mark_notification_read(&self, id: &str) -> Result<Value, GatewayError> {
        let path = format!("/api/notifications/{}/read", segment(id)?);
        self.send(ApiRequest::post(path)).await
    }

    /// `GET /api/accounts/whatsapp`
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn list_my_whatsapp_accounts(&self) -> Result<Value, GatewayError> {
        self.get("/api/accounts/whatsapp", &[]).await
    }

    /// `GET /api/admin/users`
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn admin_list_users(&self, params: Params<'_>) -> Result<Value, GatewayError> {
        self.get("/api/admin/users", params).await
    }

    /// `POST /api/admin/users`
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn admin_create_user(&self, body: &Value) -> Result<Value, GatewayError> {
        self.send(json_request(HttpMethod::Post, "/api/admin/users", body)?)
            .await
    }

    /// `PATCH /api/admin/users/{id}`
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for an unusable id, otherwise the gateway
    /// error.
    pub async fn admin_update_user(&self, id: &str, body: &Value) -> Result<Value, GatewayError> {
        let path = format!("/api/admin/users/{}", segment(id)?);
        self.send(json_request(HttpMethod::Patch, &path, body)?).await
    }

    /// `GET /api/admin/usage`
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn admin_usage(&self, params: Params<'_>) -> Result<Value, GatewayError> {
        self.get("/api/admin/usage", params).await
    }

    /// `POST /api/admin/whatsapp-accounts`
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn admin_assign_whatsapp(&self, body: &Value) -> Result<Value, GatewayError> {
        self.send(json_request(
            HttpMethod::Post,
            "/api/admin/whatsapp-accounts",
            body,
        )?)
        .await
    }

    /// `GET /api/admin/webhook-logs`
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn admin_webhook_logs(&self, params: Params<'_>) -> Result<Value, GatewayError> {
        self.get("/api/admin/webhook-logs", params).await
    }

    async fn get(&self, path: &str, params: Params<'_>) -> Result<Value, GatewayError> {
        let request = ApiRequest::get(path).with_query(params.iter().copied());
        self.send(request).await
    }

    async fn send(&self, request: ApiRequest) -> Result<Value, GatewayError> {
        self.gateway.send_json(request).await
    }
}

fn json_request<B: Serialize>(
    method: HttpMethod,
    path: &str,
    body: &B,
) -> Result<ApiRequest, GatewayError> {
    ApiRequest::new(method, path)
        .with_json(body)
        .map_err(|e| GatewayError::InvalidRequest(e.to_string()))
}

/// Checks that `id` can be used as a single path segment.
fn segment(id: &str) -> Result<&str, GatewayError> {
    let id = id.trim();
    if id.is_empty() || id.contains(['/', '?', '#']) {
        return Err(GatewayError::InvalidRequest(format!(
            "invalid identifier: {id:?}"
        )));
    }
    Ok(id)
}
