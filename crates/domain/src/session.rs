//! Session snapshot types.
//!
//! A `Session` is the read-only view every consumer gets of "who is logged
//! in". It starts out loading with no user, and the loading flag clears
//! exactly once, after the stored credential has been checked.

use serde::{Deserialize, Serialize};

use crate::user::UserProfile;

/// Current session as seen by consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The signed-in user, if any.
    pub user: Option<UserProfile>,
    /// True only while the stored credential is being restored.
    pub loading: bool,
}

impl Session {
    /// The session at process start: no user, restoration pending.
    #[must_use]
    pub const fn initializing() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// A settled session with nobody signed in.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    /// A settled session for the given user.
    #[must_use]
    pub const fn authenticated(user: UserProfile) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    /// Classifies the snapshot into its lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Initializing
        } else if self.user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    /// Returns true if a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Returns true if the signed-in user is an admin.
    ///
    /// Derived from the profile on every call.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_admin)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initializing()
    }
}

/// Lifecycle phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// The stored credential has not been checked yet.
    Initializing,
    /// Settled with no user.
    Anonymous,
    /// Settled with a user.
    Authenticated,
}
