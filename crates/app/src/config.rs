//! Client configuration.
//!
//! Loaded via the `config` crate from an optional TOML file, then from
//! `REPLYDESK_*` environment variables. Command-line flags are applied on
//! top by `main`.

use std::path::{Path, PathBuf};

use replydesk_infrastructure::adapters::DEFAULT_TIMEOUT_MS;
use replydesk_infrastructure::default_storage_dir;
use serde::Deserialize;
use url::Url;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "replydesk.toml";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Origin of the ReplyDesk API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Directory holding per-origin storage files.
    /// Defaults to the platform data directory.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_request_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            storage_dir: None,
            request_timeout_ms: default_request_timeout_ms(),
            log_filter: default_log_filter(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from `file` (or `replydesk.toml` if present) and
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file is missing, or if any
    /// source holds a value of the wrong type.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_from(file, None)
    }

    fn load_from(
        file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        config::Config::builder()
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix("REPLYDESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }

    /// Parses the API origin.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `api_base_url` is not an absolute URL.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.api_base_url)
    }

    /// Storage directory, falling back to the platform data directory and
    /// then to `.replydesk` in the working directory.
    #[must_use]
    pub fn resolved_storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .or_else(default_storage_dir)
            .unwrap_or_else(|| PathBuf::from(".replydesk"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_ms, 30_000);
        assert_eq!(config.storage_dir, None);
    }

    #[test]
    fn test_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replydesk.toml");
        std::fs::write(
            &path,
            "api_base_url = \"https://api.replydesk.example\"\nrequest_timeout_ms = 5000\n",
        )
        .unwrap();

        let mut env = config::Map::new();
        env.insert("REPLYDESK_REQUEST_TIMEOUT_MS".to_string(), "1500".to_string());
        env.insert("REPLYDESK_STORAGE_DIR".to_string(), "/tmp/rd".to_string());

        let config = ClientConfig::load_from(Some(&path), Some(env)).unwrap();

        assert_eq!(config.api_base_url, "https://api.replydesk.example");
        assert_eq!(config.request_timeout_ms, 1500);
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/rd")));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ClientConfig::load_from(Some(&missing), Some(config::Map::new())).is_err());
    }

    #[test]
    fn test_bad_base_url() {
        let config = ClientConfig {
            api_base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(config.base_url().is_err());
    }
}
