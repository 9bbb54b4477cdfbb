//! Route access control and navigation.

mod controller;
mod guard;

pub use controller::NavigationController;
pub use guard::{GuardDecision, RouteGuard};
