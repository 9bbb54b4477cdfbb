//! Session authority: the single writer of session state.
//!
//! The authority owns the credential store and the current `Session`
//! snapshot. Every transition goes through one of its methods, and each
//! method updates persisted and in-memory state under the same lock, so no
//! reader ever sees the two disagree.
//!
//! ```text
//!   Initializing --restore (record found)--> Authenticated
//!   Initializing --restore (nothing found)-> Anonymous
//!   Anonymous    --login_success---------->  Authenticated
//!   Authenticated --logout / 401---------->  Anonymous
//! ```

use replydesk_domain::{CredentialRecord, Session, SessionPhase, UserProfile};
use tokio::sync::watch;

use crate::auth::credential_store::{CredentialReader, CredentialStore};
use crate::error::ApplicationResult;
use crate::gateway::{Unauthorized, UnauthorizedListener};

/// Owns session state and the credential store behind it.
///
/// Construct one per process and share it via `Arc`.
#[derive(Debug)]
pub struct SessionAuthority {
    store: CredentialStore,
    state: watch::Sender<Session>,
}

impl SessionAuthority {
    /// Creates an authority in the initializing state.
    ///
    /// Call [`restore`](Self::restore) to settle it.
    #[must_use]
    pub fn new(store: CredentialStore) -> Self {
        let (state, _) = watch::channel(Session::initializing());
        Self { store, state }
    }

    /// Creates an authority and immediately runs restoration.
    #[must_use]
    pub fn restored(store: CredentialStore) -> Self {
        let authority = Self::new(store);
        authority.restore();
        authority
    }

    /// Restores the session from the credential store.
    ///
    /// Runs once; later calls return the current phase without touching
    /// storage.
    pub fn restore(&self) -> SessionPhase {
        self.state.send_if_modified(|session| {
            if !session.loading {
                return false;
            }
            if session.user.is_none() {
                session.user = self.store.load().map(|record| record.profile);
            }
            session.loading = false;
            true
        });

        let phase = self.state.borrow().phase();
        tracing::debug!(?phase, "session restored");
        phase
    }

    /// Records a successful login or registration.
    ///
    /// Persists the credential and publishes the new user in one step. If
    /// called before restoration, it also ends the initializing phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or the credential cannot be
    /// persisted. The session is left unchanged in that case.
    pub fn login_success(&self, profile: UserProfile, token: &str) -> ApplicationResult<()> {
        let record = CredentialRecord::new(token, profile)?;
        let mut outcome: ApplicationResult<()> = Ok(());

        self.state.send_if_modified(|session| {
            match self.store.persist(&record.profile, &record.token) {
                Ok(()) => {
                    session.user = Some(record.profile.clone());
                    session.loading = false;
                    true
                }
                Err(e) => {
                    outcome = Err(e.into());
                    false
                }
            }
        });

        if outcome.is_ok() {
            tracing::info!(
                user_id = %record.profile.id,
                role = %record.profile.role,
                "signed in"
            );
        }
        outcome
    }

    /// Signs out: clears the credential store and the in-memory user.
    ///
    /// Calling it when already signed out is a no-op apart from re-clearing
    /// storage.
    pub fn logout(&self) {
        let changed = self.state.send_if_modified(|session| {
            self.store.clear();
            session.user.take().is_some()
        });

        if changed {
            tracing::info!("signed out");
        } else {
            tracing::debug!("logout on anonymous session ignored");
        }
    }

    /// Current session snapshot.
    #[must_use]
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase()
    }

    /// Signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user.clone()
    }

    /// True while restoration has not completed.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// True if the signed-in user has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Read-only token access for the gateway.
    #[must_use]
    pub fn credentials(&self) -> CredentialReader {
        self.store.reader()
    }
}

impl UnauthorizedListener for SessionAuthority {
    fn on_unauthorized(&self, signal: &Unauthorized) {
        tracing::info!(
            method = %signal.method,
            path = %signal.path,
            "server rejected credentials; ending session"
        );
        self.logout();
    }
}
