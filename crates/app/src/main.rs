//! ReplyDesk CLI - Main Entry Point
//!
//! Loads configuration, installs logging, wires the client core, and runs
//! one subcommand.

mod cli;
mod commands;
mod config;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::commands::Client;
use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = Some(dir);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_filter))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(api = %config.api_base_url, "starting ReplyDesk CLI v{}", env!("CARGO_PKG_VERSION"));

    let client = Client::connect(&config)?;
    if let Err(e) = client.run(cli.command).await {
        eprintln!("error: {}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
