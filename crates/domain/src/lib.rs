//! ReplyDesk Domain - Core client types
//!
//! This crate defines the domain model for the ReplyDesk dashboard client.
//! All types here are pure Rust with no I/O dependencies.

pub mod api;
pub mod credential;
pub mod error;
pub mod request;
pub mod response;
pub mod route;
pub mod session;
pub mod user;

pub use api::{ApiErrorBody, AuthResponse, LoginRequest, RegisterRequest};
pub use credential::{CredentialRecord, bearer_header};
pub use error::{DomainError, DomainResult};
pub use request::{ApiRequest, HttpMethod};
pub use response::{ApiResponse, StatusCode};
pub use route::{AccessTier, Route};
pub use session::{Session, SessionPhase};
pub use user::{Role, UserProfile};
