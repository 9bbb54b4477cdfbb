//! Navigation controller: runs the route guard on every location change.

use std::sync::{Arc, Mutex, PoisonError};

use replydesk_domain::Route;
use tokio::task::JoinHandle;

use crate::auth::SessionAuthority;
use crate::gateway::{Unauthorized, UnauthorizedListener};
use crate::ports::Navigator;
use crate::routing::guard::{GuardDecision, RouteGuard};

/// Applies the route guard to navigations and session changes.
///
/// Unmatched paths are replaced with the landing screen before the guard
/// runs. Redirects replace the current history entry.
pub struct NavigationController<N> {
    navigator: N,
    session: Arc<SessionAuthority>,
    guard: RouteGuard,
    current: Mutex<GuardDecision>,
}

impl<N> std::fmt::Debug for NavigationController<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

impl<N: Navigator> NavigationController<N> {
    /// Creates a controller with the default guard.
    #[must_use]
    pub fn new(navigator: N, session: Arc<SessionAuthority>) -> Self {
        Self::with_guard(navigator, session, RouteGuard::default())
    }

    /// Creates a controller with a custom guard.
    #[must_use]
    pub const fn with_guard(navigator: N, session: Arc<SessionAuthority>, guard: RouteGuard) -> Self {
        Self {
            navigator,
            session,
            guard,
            current: Mutex::new(GuardDecision::Placeholder),
        }
    }

    /// Pushes `path` and evaluates it.
    pub fn navigate(&self, path: &str) -> GuardDecision {
        self.navigator.push(path);
        self.refresh()
    }

    /// Re-evaluates the current location against the current session.
    pub fn refresh(&self) -> GuardDecision {
        let location = self.navigator.location();
        let route = Route::parse(&location).unwrap_or_else(|| {
            tracing::debug!(%location, "no screen matches; showing landing");
            self.navigator.replace(&Route::LANDING.path());
            Route::LANDING
        });

        let decision = self.guard.decide(&self.session.session(), &route);
        if let GuardDecision::Redirect(target) = &decision {
            tracing::debug!(from = %route, to = %target, "redirecting");
            self.navigator.replace(&target.path());
        }

        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = decision.clone();
        decision
    }

    /// The last decision made.
    #[must_use]
    pub fn current(&self) -> GuardDecision {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current location as reported by the navigator.
    #[must_use]
    pub fn location(&self) -> String {
        self.navigator.location()
    }
}

impl<N: Navigator + 'static> NavigationController<N> {
    /// Spawns a task that re-evaluates the location on every session change.
    ///
    /// The task holds the controller alive; abort the handle to stop it.
    #[must_use]
    pub fn watch(self: Arc<Self>) -> JoinHandle<()> {
        let mut changes = self.session.subscribe();
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                self.refresh();
            }
        })
    }
}

impl<N: Navigator> UnauthorizedListener for NavigationController<N> {
    fn on_unauthorized(&self, _signal: &Unauthorized) {
        let login = Route::LOGIN.path();
        self.navigator.replace(&login);
        self.refresh();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::auth::CredentialStore;
    use crate::testing::{MemoryKv, RecordingNavigator};
    use pretty_assertions::assert_eq;
    use replydesk_domain::{HttpMethod, Role, UserProfile};

    fn setup(
        kv: &Arc<MemoryKv>,
        at: &str,
    ) -> (Arc<SessionAuthority>, NavigationController<Arc<RecordingNavigator>>, Arc<RecordingNavigator>) {
        let session = Arc::new(SessionAuthority::new(CredentialStore::new(kv.clone())));
        let navigator = Arc::new(RecordingNavigator::at(at));
        let controller = NavigationController::new(navigator.clone(), session.clone());
        (session, controller, navigator)
    }

    #[test]
    fn test_initializing_shows_placeholder_without_redirect() {
        let kv = Arc::new(MemoryKv::default());
        let (_session, controller, navigator) = setup(&kv, "/leads");

        assert_eq!(controller.refresh(), GuardDecision::Placeholder);
        assert_eq!(navigator.history(), vec!["/leads".to_string()]);
    }

    #[test]
    fn test_anonymous_protected_redirects_to_login() {
        let kv = Arc::new(MemoryKv::default());
        let (session, controller, navigator) = setup(&kv, "/");
        session.restore();

        let decision = controller.navigate("/leads");

        assert_eq!(decision, GuardDecision::Redirect(Route::Login));
        assert_eq!(navigator.location(), "/login");
        assert_eq!(navigator.history(), vec!["/".to_string(), "/login".to_string()]);
    }

    #[test]
    fn test_unmatched_path_falls_back_to_landing() {
        let kv = Arc::new(MemoryKv::default());
        let (session, controller, navigator) = setup(&kv, "/");
        session.restore();
        session
            .login_success(UserProfile::new("1", "u@x.co", Role::User), "tok")
            .unwrap();

        let decision = controller.navigate("/nope/nothing");

        assert_eq!(decision, GuardDecision::Render(Route::Dashboard));
        assert_eq!(navigator.location(), "/");
    }

    #[test]
    fn test_non_admin_on_admin_route_lands_on_dashboard() {
        let kv = Arc::new(MemoryKv::default());
        let (session, controller, navigator) = setup(&kv, "/");
        session.restore();
        session
            .login_success(UserProfile::new("1", "u@x.co", Role::User), "tok")
            .unwrap();

        assert_eq!(
            controller.navigate("/admin/users"),
            GuardDecision::Redirect(Route::Dashboard)
        );
        assert_eq!(navigator.location(), "/");
    }

    #[test]
    fn test_unauthorized_forces_login_even_from_public_screen() {
        let kv = Arc::new(MemoryKv::default());
        let (session, controller, navigator) = setup(&kv, "/demo");
        session.restore();

        controller.on_unauthorized(&Unauthorized {
            method: HttpMethod::Get,
            path: "/api/leads".to_string(),
            detail: None,
        });

        assert_eq!(navigator.location(), "/login");
        assert_eq!(controller.current(), GuardDecision::Render(Route::Login));
    }

    #[tokio::test]
    async fn test_watch_reevaluates_after_logout() {
        let kv = Arc::new(MemoryKv::default());
        CredentialStore::new(kv.clone()).save(&UserProfile::new("1", "u@x.co", Role::User), "tok");
        let (session, controller, navigator) = setup(&kv, "/leads");
        let controller = Arc::new(controller);
        let handle = controller.clone().watch();

        session.restore();
        tokio::task::yield_now().await;
        for _ in 0..50 {
            if controller.current() == GuardDecision::Render(Route::Leads) {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(controller.current(), GuardDecision::Render(Route::Leads));

        session.logout();
        for _ in 0..50 {
            if navigator.location() == "/login" {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(navigator.location(), "/login");

        handle.abort();
    }
}
