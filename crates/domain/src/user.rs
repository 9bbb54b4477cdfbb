//! User profile and role types.
//!
//! Profiles are produced by the server on login, registration, or
//! restoration from storage. The client never edits a profile in place;
//! a new profile always replaces the old one wholesale.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Access role attached to every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular tenant with access to their own conversations and leads.
    #[default]
    User,
    /// Platform operator with access to the admin screens.
    Admin,
}

impl Role {
    /// Returns true if this role has admin privileges.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the role as its wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated principal as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-assigned identifier.
    pub id: String,
    /// Login email address.
    pub email: String,
    /// Display name, if the account has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Access role.
    pub role: Role,
    /// Whether the account is enabled.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl UserProfile {
    /// Creates an active profile without a display name.
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            full_name: None,
            role,
            is_active: true,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Returns true if this profile carries the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Name to show in chrome: the full name when present, else the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert!(matches!(
            "owner".parse::<Role>(),
            Err(DomainError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_profile_deserializes_server_payload() {
        let json = r#"{
            "id": "u-1",
            "email": "ops@example.com",
            "full_name": "Ops",
            "role": "admin",
            "is_active": true
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(
            profile,
            UserProfile::new("u-1", "ops@example.com", Role::Admin).with_full_name("Ops")
        );
        assert!(profile.is_admin());
    }

    #[test]
    fn test_profile_defaults_optional_fields() {
        let json = r#"{"id": "u-2", "email": "a@b.co", "role": "user"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(profile.is_active);
        assert_eq!(profile.full_name, None);
        assert_eq!(profile.display_name(), "a@b.co");
    }

    #[test]
    fn test_profile_rejects_unknown_role() {
        let json = r#"{"id": "u-3", "email": "a@b.co", "role": "root"}"#;
        assert!(serde_json::from_str::<UserProfile>(json).is_err());
    }
}
