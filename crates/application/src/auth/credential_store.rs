//! Durable credential storage.
//!
//! The token and the profile live under two well-known keys and are written
//! and cleared together. A record with only one half present, or with a
//! profile that no longer parses, is treated as corrupt: `load` clears it
//! and reports nothing stored.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use replydesk_domain::{CredentialRecord, UserProfile};

use crate::ports::{KeyValueStorage, StorageError};

/// Storage key holding the JSON-serialized profile.
pub const USER_KEY: &str = "user";

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Persists the credential record on top of a `KeyValueStorage`.
///
/// Cloning yields another handle to the same storage and lock.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
    lock: Arc<Mutex<()>>,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

impl CredentialStore {
    /// Creates a store backed by `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            lock: Arc::new(Mutex::new(())),
        }
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes the profile and token together.
    ///
    /// Failures are logged and leave nothing behind.
    pub fn save(&self, profile: &UserProfile, token: &str) {
        if let Err(e) = self.persist(profile, token) {
            tracing::warn!(error = %e, "failed to persist credential; ignoring");
        }
    }

    /// Writes the profile and token together, reporting failures.
    ///
    /// If the write fails part-way, whatever was written is removed again.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be serialized or the storage
    /// cannot be written.
    pub fn persist(&self, profile: &UserProfile, token: &str) -> Result<(), StorageError> {
        let serialized =
            serde_json::to_string(profile).map_err(|e| StorageError::Serialization(e.to_string()))?;

        let _guard = self.guard();
        if let Err(e) = self
            .storage
            .set_items(&[(USER_KEY, serialized.as_str()), (TOKEN_KEY, token)])
        {
            if let Err(cleanup) = self.storage.remove_items(&[USER_KEY, TOKEN_KEY]) {
                tracing::warn!(error = %cleanup, "failed to roll back partial credential write");
            }
            return Err(e);
        }
        tracing::debug!(user_id = %profile.id, "credential persisted");
        Ok(())
    }

    /// Reads the stored record.
    ///
    /// Returns `None` when nothing usable is stored. Corrupt or partial
    /// records are cleared before returning.
    #[must_use]
    pub fn load(&self) -> Option<CredentialRecord> {
        let _guard = self.guard();

        let token = self.read(TOKEN_KEY)?;
        let user = self.read(USER_KEY)?;

        let (token, user) = match (token, user) {
            (None, None) => return None,
            (Some(token), Some(user)) if !token.trim().is_empty() => (token, user),
            _ => {
                tracing::warn!("discarding partial credential record");
                self.clear_locked();
                return None;
            }
        };

        let profile = match serde_json::from_str::<UserProfile>(&user) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable stored profile");
                self.clear_locked();
                return None;
            }
        };

        match CredentialRecord::new(token, profile) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "discarding invalid credential record");
                self.clear_locked();
                None
            }
        }
    }

    /// Returns the stored token, if any, without touching the profile.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        let _guard = self.guard();
        self.read(TOKEN_KEY)
            .flatten()
            .filter(|token| !token.trim().is_empty())
    }

    /// Removes both halves of the record. Clearing an empty store is a no-op.
    pub fn clear(&self) {
        let _guard = self.guard();
        self.clear_locked();
    }

    /// Read-only view for components that only attach the token.
    #[must_use]
    pub fn reader(&self) -> CredentialReader {
        CredentialReader {
            store: self.clone(),
        }
    }

    /// Reads one key. The outer `None` means the storage itself failed.
    fn read(&self, key: &str) -> Option<Option<String>> {
        match self.storage.get_item(key) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read credential storage");
                None
            }
        }
    }

    /// Removes both keys. If the storage refuses removal, the token is
    /// blanked instead, which `load` and `token` read as absent.
    fn clear_locked(&self) {
        let Err(e) = self.storage.remove_items(&[USER_KEY, TOKEN_KEY]) else {
            return;
        };
        tracing::warn!(error = %e, "failed to clear credential storage; blanking token");
        if let Err(e) = self.storage.set_item(TOKEN_KEY, "") {
            tracing::warn!(error = %e, "failed to blank stored token");
        }
    }
}

/// Read-only access to the stored token.
///
/// Handed to the gateway so that only the session authority can write.
#[derive(Debug, Clone)]
pub struct CredentialReader {
    store: CredentialStore,
}

impl CredentialReader {
    /// Returns the stored token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.token()
    }
}
