//! Route guard: decides what a session may see at a route.

use replydesk_domain::{AccessTier, Route, Session, SessionPhase};

/// Result of evaluating a route against a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session is still restoring; show a neutral loading view.
    Placeholder,
    /// Send the user elsewhere, replacing the current history entry.
    Redirect(Route),
    /// Show the requested screen.
    Render(Route),
}

impl GuardDecision {
    /// The screen that ends up on display, if any.
    #[must_use]
    pub const fn screen(&self) -> Option<&Route> {
        match self {
            Self::Placeholder => None,
            Self::Redirect(route) | Self::Render(route) => Some(route),
        }
    }
}

/// Pure access check over session state and route tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    login: Route,
    landing: Route,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            login: Route::LOGIN,
            landing: Route::LANDING,
        }
    }
}

impl RouteGuard {
    /// Creates a guard with custom login and landing screens.
    #[must_use]
    pub const fn new(login: Route, landing: Route) -> Self {
        Self { login, landing }
    }

    /// Decides what to show for `route`.
    ///
    /// Checks run in this order, and the order matters: a restoring session
    /// never redirects, an anonymous user is sent to login before the admin
    /// check runs, and a signed-in non-admin is sent to the landing screen.
    #[must_use]
    pub fn decide(&self, session: &Session, route: &Route) -> GuardDecision {
        let tier = route.tier();
        match session.phase() {
            SessionPhase::Initializing => GuardDecision::Placeholder,
            SessionPhase::Anonymous if tier.requires_user() => {
                GuardDecision::Redirect(self.login.clone())
            }
            SessionPhase::Authenticated if tier == AccessTier::Admin && !session.is_admin() => {
                GuardDecision::Redirect(self.landing.clone())
            }
            _ => GuardDecision::Render(route.clone()),
        }
    }
}
