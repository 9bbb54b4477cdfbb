//! ReplyDesk Application - Session, gateway, and routing
//!
//! This crate defines the application layer with:
//! - Port traits (storage, transport, navigation)
//! - The session authority and credential store
//! - The gateway client and its middleware
//! - Route guarding and the endpoint catalog

pub mod api;
pub mod auth;
pub mod error;
pub mod gateway;
pub mod ports;
pub mod routing;
pub mod use_cases;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod testing;

pub use api::DashboardApi;
pub use auth::{CredentialReader, CredentialStore, SessionAuthority};
pub use error::{ApplicationError, ApplicationResult};
pub use gateway::{GatewayClient, GatewayError, Unauthorized, UnauthorizedListener};
pub use ports::{HttpTransport, KeyValueStorage, Navigator, StorageError, TransportError};
pub use routing::{GuardDecision, NavigationController, RouteGuard};
pub use use_cases::{
    AuthenticatedOutput, SignIn, SignInInput, SignOut, SignOutOutput, SignUp,
};
