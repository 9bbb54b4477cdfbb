//! Session and credential management.
//!
//! This module provides:
//! - Durable credential storage with self-healing restoration
//! - The session authority, the only writer of session state

mod credential_store;
mod session;

pub use credential_store::{CredentialReader, CredentialStore, TOKEN_KEY, USER_KEY};
pub use session::SessionAuthority;
