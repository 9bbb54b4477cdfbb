//! Sign-in, sign-up, and sign-out use cases.

use std::sync::Arc;

use replydesk_domain::{AuthResponse, LoginRequest, RegisterRequest, Route, UserProfile};

use crate::api::DashboardApi;
use crate::auth::SessionAuthority;
use crate::error::ApplicationResult;
use crate::ports::HttpTransport;

/// Input for signing in.
#[derive(Debug, Clone)]
pub struct SignInInput {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Result of a successful sign-in or sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedOutput {
    /// The signed-in user.
    pub user: UserProfile,
    /// Screen to show next.
    pub redirect_to: Route,
}

/// Use case for signing in with email and password.
pub struct SignIn<T> {
    api: Arc<DashboardApi<T>>,
    session: Arc<SessionAuthority>,
}

impl<T: HttpTransport> SignIn<T> {
    /// Creates a new `SignIn` use case.
    #[must_use]
    pub const fn new(api: Arc<DashboardApi<T>>, session: Arc<SessionAuthority>) -> Self {
        Self { api, session }
    }

    /// Calls the login endpoint and records the session.
    ///
    /// # Errors
    /// - Returns a gateway error if the server rejects the credentials
    /// - Returns a storage error if the credential cannot be persisted
    pub async fn execute(&self, input: SignInInput) -> ApplicationResult<AuthenticatedOutput> {
        let body = LoginRequest::new(input.email, input.password);
        let response = self.api.login(&body).await?;
        complete(&self.session, response)
    }
}

/// Use case for creating an account, which also signs in.
pub struct SignUp<T> {
    api: Arc<DashboardApi<T>>,
    session: Arc<SessionAuthority>,
}

impl<T: HttpTransport> SignUp<T> {
    /// Creates a new `SignUp` use case.
    #[must_use]
    pub const fn new(api: Arc<DashboardApi<T>>, session: Arc<SessionAuthority>) -> Self {
        Self { api, session }
    }

    /// Calls the register endpoint and records the session.
    ///
    /// # Errors
    /// - Returns a gateway error if the server rejects the registration,
    ///   e.g. because the email is taken
    /// - Returns a storage error if the credential cannot be persisted
    pub async fn execute(&self, input: RegisterRequest) -> ApplicationResult<AuthenticatedOutput> {
        let response = self.api.register(&input).await?;
        complete(&self.session, response)
    }
}

fn complete(
    session: &SessionAuthority,
    response: AuthResponse,
) -> ApplicationResult<AuthenticatedOutput> {
    session.login_success(response.user.clone(), &response.access_token)?;
    Ok(AuthenticatedOutput {
        user: response.user,
        redirect_to: Route::LANDING,
    })
}

/// Result of signing out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOutOutput {
    /// Screen to show next.
    pub redirect_to: Route,
}

/// Use case for signing out.
#[derive(Debug)]
pub struct SignOut {
    session: Arc<SessionAuthority>,
}

impl SignOut {
    /// Creates a new `SignOut` use case.
    #[must_use]
    pub const fn new(session: Arc<SessionAuthority>) -> Self {
        Self { session }
    }

    /// Ends the session. Never fails.
    #[must_use]
    pub fn execute(&self) -> SignOutOutput {
        self.session.logout();
        SignOutOutput {
            redirect_to: Route::LOGIN,
        }
    }
}
