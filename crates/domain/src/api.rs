//! Wire types for the authentication endpoints and error bodies.

use serde::{Deserialize, Serialize};

use crate::user::UserProfile;

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl LoginRequest {
    /// Creates a login body.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Successful response of login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Profile of the signed-in user.
    pub user: UserProfile,
    /// Bearer token to send with subsequent requests.
    pub access_token: String,
    /// Token scheme, always `bearer` in practice.
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Error body returned with non-2xx statuses.
///
/// `detail` is usually a string. Request validation failures carry a list of
/// `{ "loc": [...], "msg": "..." }` objects instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable detail, or a list of validation entries.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Flattens `detail` into a single message.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        match self.detail? {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Array(items) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .map(str::to_string)
                    .collect();
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("; "))
                }
            }
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::user::Role;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_auth_response_parses() {
        let json = r#"{
            "access_token": "tok",
            "token_type": "bearer",
            "user": {"id": "u-1", "email": "a@b.co", "role": "user", "is_active": true}
        }"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "tok");
        assert_eq!(response.user.role, Role::User);
    }

    #[test]
    fn test_register_omits_missing_name() {
        let body = RegisterRequest {
            email: "a@b.co".into(),
            password: "pw".into(),
            full_name: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"email":"a@b.co","password":"pw"}"#
        );
    }

    #[test]
    fn test_validation_detail_is_flattened() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address"}]}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_message().as_deref(),
            Some("value is not a valid email address")
        );
    }

    #[test]
    fn test_missing_detail() {
        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.into_message(), None);
    }
}
