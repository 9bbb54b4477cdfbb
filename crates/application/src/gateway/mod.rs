//! Gateway client and its middleware.
//!
//! Every API call goes through [`GatewayClient`], which attaches credentials
//! on the way out and turns 401 responses into an [`Unauthorized`] signal on
//! the way back.

mod client;
mod error;
mod middleware;

pub use client::GatewayClient;
pub use error::GatewayError;
pub use middleware::{
    BearerAuth, JsonContentType, RequestMiddleware, ResponseMiddleware, Unauthorized,
    UnauthorizedGuard, UnauthorizedListener,
};
