//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ReplyDesk - command-line client for the WhatsApp auto-reply dashboard
#[derive(Parser, Debug)]
#[command(name = "replydesk")]
#[command(author = "ReplyDesk Team")]
#[command(version)]
#[command(about = "Sign in to ReplyDesk and call its API from the terminal", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./replydesk.toml if present)
    #[arg(long = "config", env = "REPLYDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// API origin, e.g. http://localhost:8000
    #[arg(short = 'u', long = "api-url")]
    pub api_url: Option<String>,

    /// Directory for stored credentials
    #[arg(long = "storage-dir")]
    pub storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in and store the session
    Login {
        /// Account email
        email: String,
        /// Account password
        #[arg(long = "password", env = "REPLYDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Signup {
        /// Account email
        email: String,
        /// Chosen password
        #[arg(long = "password", env = "REPLYDESK_PASSWORD", hide_env_values = true)]
        password: String,
        /// Display name
        #[arg(long = "full-name")]
        full_name: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Navigate to a dashboard path and show what would be displayed
    Open {
        /// Dashboard path, e.g. /leads or /admin/users
        path: String,
    },

    /// Send an authenticated GET and print the JSON response
    Get {
        /// API path, e.g. /api/leads
        path: String,
        /// Query parameter as key=value (repeatable)
        #[arg(short = 'q', long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,
    },

    /// Download the leads CSV export
    ExportLeads {
        /// Output file
        file: PathBuf,
    },
}
