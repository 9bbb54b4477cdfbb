//! Subcommand handlers.

use std::path::Path;
use std::sync::Arc;

use replydesk_application::{
    ApplicationError, CredentialStore, DashboardApi, GatewayClient, GatewayError, GuardDecision,
    NavigationController, SessionAuthority, SignIn, SignInInput, SignOut, SignUp,
    TransportError, UnauthorizedListener,
};
use replydesk_domain::{ApiRequest, RegisterRequest, Route};
use replydesk_infrastructure::{FileStorage, HistoryNavigator, ReqwestTransport};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::cli::Command;
use crate::config::ClientConfig;

/// Errors reported by subcommands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The configured API origin is not a URL.
    #[error("invalid API URL {url:?}: {message}")]
    InvalidBaseUrl {
        /// Configured value.
        url: String,
        /// Parser message.
        message: String,
    },

    /// A `--query` argument is not `key=value`.
    #[error("invalid query parameter {0:?}, expected KEY=VALUE")]
    InvalidQuery(String),

    /// The HTTP client could not be created.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A use case failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<GatewayError> for CommandError {
    fn from(err: GatewayError) -> Self {
        Self::Application(err.into())
    }
}

impl CommandError {
    /// Message for the terminal, preferring server-provided detail.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Application(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

type Navigation = NavigationController<Arc<HistoryNavigator>>;

/// Wired-up client core for one invocation.
pub struct Client {
    session: Arc<SessionAuthority>,
    navigation: Arc<Navigation>,
    api: Arc<DashboardApi<ReqwestTransport>>,
    watcher: JoinHandle<()>,
}

impl Drop for Client {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

impl Client {
    /// Builds the core from configuration and restores any stored session.
    ///
    /// Also starts the task that re-runs the route guard whenever the
    /// session changes, so it must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn connect(config: &ClientConfig) -> Result<Self, CommandError> {
        let base_url = config
            .base_url()
            .map_err(|e| CommandError::InvalidBaseUrl {
                url: config.api_base_url.clone(),
                message: e.to_string(),
            })?;

        let storage = FileStorage::for_origin(&config.resolved_storage_dir(), &base_url);
        tracing::debug!(path = %storage.path().display(), "using credential storage");

        let session = Arc::new(SessionAuthority::new(CredentialStore::new(Arc::new(storage))));
        let navigation = Arc::new(NavigationController::new(
            Arc::new(HistoryNavigator::new(&Route::LANDING.path())),
            session.clone(),
        ));

        let transport = ReqwestTransport::new(base_url, config.request_timeout_ms)?;
        let listeners: [Arc<dyn UnauthorizedListener>; 2] =
            [session.clone(), navigation.clone()];
        let gateway = GatewayClient::standard(transport, session.credentials(), listeners);

        let watcher = navigation.clone().watch();
        session.restore();

        Ok(Self {
            session,
            navigation,
            api: Arc::new(DashboardApi::new(gateway)),
            watcher,
        })
    }

    /// Runs one subcommand.
    ///
    /// # Errors
    ///
    /// Returns the first error the command hits.
    pub async fn run(&self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::Login { email, password } => self.login(email, password).await,
            Command::Signup {
                email,
                password,
                full_name,
            } => {
                self.signup(RegisterRequest {
                    email,
                    password,
                    full_name,
                })
                .await
            }
            Command::Logout => {
                self.logout();
                Ok(())
            }
            Command::Whoami => {
                self.whoami();
                Ok(())
            }
            Command::Open { path } => {
                self.open(&path);
                Ok(())
            }
            Command::Get { path, query } => self.get(&path, &query).await,
            Command::ExportLeads { file } => self.export_leads(&file).await,
        }
    }

    async fn login(&self, email: String, password: String) -> Result<(), CommandError> {
        let output = SignIn::new(self.api.clone(), self.session.clone())
            .execute(SignInInput { email, password })
            .await?;
        self.navigation.navigate(&output.redirect_to.path());
        println!(
            "Signed in as {} ({})",
            output.user.display_name(),
            output.user.role
        );
        Ok(())
    }

    async fn signup(&self, request: RegisterRequest) -> Result<(), CommandError> {
        let output = SignUp::new(self.api.clone(), self.session.clone())
            .execute(request)
            .await?;
        self.navigation.navigate(&output.redirect_to.path());
        println!("Account created for {}", output.user.email);
        Ok(())
    }

    fn logout(&self) {
        let output = SignOut::new(self.session.clone()).execute();
        self.navigation.navigate(&output.redirect_to.path());
        println!("Signed out");
    }

    fn whoami(&self) {
        match self.session.user() {
            Some(user) => {
                println!("{} <{}>", user.display_name(), user.email);
                println!("id:   {}", user.id);
                println!("role: {}", user.role);
            }
            None => println!("Not signed in"),
        }
    }

    fn open(&self, path: &str) {
        let decision = self.navigation.navigate(path);
        match &decision {
            GuardDecision::Placeholder => println!("Loading..."),
            GuardDecision::Redirect(route) => {
                println!("{path} -> {} ({})", route.path(), route.title());
            }
            GuardDecision::Render(route) => println!("{} ({})", route.title(), route.path()),
        }

        let menu = Route::menu_for(&self.session.session());
        if !menu.is_empty() {
            let entries: Vec<&str> = menu.iter().map(Route::title).collect();
            println!("menu: {}", entries.join(" | "));
        }
    }

    async fn get(&self, path: &str, query: &[String]) -> Result<(), CommandError> {
        let pairs = query
            .iter()
            .map(|pair| {
                pair.split_once('=')
                    .filter(|(key, _)| !key.is_empty())
                    .ok_or_else(|| CommandError::InvalidQuery(pair.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request = ApiRequest::get(path).with_query(pairs);
        let result = self
            .api
            .gateway()
            .send_json::<serde_json::Value>(request)
            .await;

        match result {
            Ok(body) => {
                println!("{}", serde_json::to_string_pretty(&body)?);
                Ok(())
            }
            Err(err @ GatewayError::Unauthorized { .. }) => {
                eprintln!(
                    "Session is no longer valid; now at {}",
                    self.navigation.location()
                );
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn export_leads(&self, file: &Path) -> Result<(), CommandError> {
        let csv = self.api.export_leads_csv().await?;
        tokio::fs::write(file, &csv).await?;
        println!("Wrote {} bytes to {}", csv.len(), file.display());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use replydesk_domain::{Role, SessionPhase, UserProfile};

    fn config_in(dir: &Path) -> ClientConfig {
        ClientConfig {
            storage_dir: Some(dir.to_path_buf()),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_connect_rejects_bad_url() {
        let config = ClientConfig {
            api_base_url: "::nope".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            Client::connect(&config),
            Err(CommandError::InvalidBaseUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_connect_restores_stored_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let storage = FileStorage::for_origin(dir.path(), &config.base_url().unwrap());
        CredentialStore::new(Arc::new(storage))
            .save(&UserProfile::new("u-1", "ops@x.co", Role::Admin), "tok");

        let client = Client::connect(&config).unwrap();

        assert_eq!(client.session.phase(), SessionPhase::Authenticated);
        assert!(client.session.is_admin());
    }

    #[tokio::test]
    async fn test_open_without_session_lands_on_login() {
        let dir = tempfile::tempdir().unwrap();
        let client = Client::connect(&config_in(dir.path())).unwrap();

        client
            .run(Command::Open {
                path: "/leads".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(client.navigation.location(), "/login");
    }

    #[tokio::test]
    async fn test_session_change_moves_navigation_without_a_command() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let storage = FileStorage::for_origin(dir.path(), &config.base_url().unwrap());
        CredentialStore::new(Arc::new(storage))
            .save(&UserProfile::new("u-1", "a@x.co", Role::User), "tok");
        let client = Client::connect(&config).unwrap();
        client.navigation.navigate("/leads");

        client.session.logout();
        for _ in 0..50 {
            if client.navigation.location() == "/login" {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert_eq!(client.navigation.location(), "/login");
        assert_eq!(
            client.navigation.current(),
            GuardDecision::Render(Route::Login)
        );
    }

    #[tokio::test]
    async fn test_malformed_query_is_rejected_before_sending() {
        let dir = tempfile::tempdir().unwrap();
        let client = Client::connect(&config_in(dir.path())).unwrap();

        let err = client
            .run(Command::Get {
                path: "/api/leads".to_string(),
                query: vec!["novalue".to_string()],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CommandError::InvalidQuery(_)));
    }
}
