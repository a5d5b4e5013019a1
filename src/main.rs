//! Mini Library - command-line client
//!
//! Talks to the Mini Library REST API on behalf of readers and librarians.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_library::{
    cli::{dispatch, exit_code, Cli},
    config::AppConfig,
    error::ClientError,
    views, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Logs go to stderr so command output stays clean
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("mini_library={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!(
        "Mini Library client v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api.base_url
    );

    let state = AppState::new(config).context("Failed to set up the API client")?;

    match dispatch(cli.command, &state).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(ClientError::Validation(errors)) => {
            eprintln!("The form has errors:\n{}", views::form_errors(&errors));
            std::process::exit(exit_code(&ClientError::Validation(errors)));
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_auth_failure() {
                eprintln!("Run `mini-library login` to start a session.");
            }
            std::process::exit(exit_code(&e));
        }
    }
}
