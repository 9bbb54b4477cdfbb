//! Persisted credential record.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::user::UserProfile;

/// Bearer token and the profile it was issued for, stored and cleared as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Opaque bearer token.
    pub token: String,
    /// Cached profile of the token's owner.
    pub profile: UserProfile,
}

impl CredentialRecord {
    /// Creates a record, rejecting an empty token.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteCredential` if the token is empty or
    /// only whitespace.
    pub fn new(token: impl Into<String>, profile: UserProfile) -> DomainResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(DomainError::IncompleteCredential(
                "token is empty".to_string(),
            ));
        }
        Ok(Self { token, profile })
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        bearer_header(&self.token)
    }
}

/// Formats a token as an `Authorization` header value.
#[must_use]
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}
