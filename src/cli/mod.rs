//! Command-line front end for folio.
//!
//! `main` parses the arguments and hands them to [`run_cli_command`], which
//! wires the production adapters into a [`FolioApp`](crate::app::FolioApp)
//! and runs the matching handler on a tokio runtime.
//!
//! ```ignore
//! use folio::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Err(e) = run_cli_command(command) {
//!     std::process::exit(1);
//! }
//! ```

pub mod args;
pub mod commands;
pub mod output;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use commands::execute;
pub use version::{version_line, VERSION};

use std::sync::Arc;

use crate::adapters::{FileCredentialsProvider, HttpImageLoader, ReqwestHttpClient};
use crate::app::FolioApp;
use crate::config::ClientConfig;
use crate::error::{FolioResult, NetworkError, SystemError};
use crate::storage::StorageManager;

/// Run a parsed command.
///
/// `Version` and `Help` print and return without touching the network.
/// Everything else restores the stored session first.
pub fn run_cli_command(command: CliCommand) -> FolioResult<()> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        _ => {}
    }

    let config = ClientConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_async(command, config))
}

async fn run_async(command: CliCommand, config: ClientConfig) -> FolioResult<()> {
    let http = ReqwestHttpClient::with_timeout(config.request_timeout())
        .map_err(|e| NetworkError::from_http(e, &config.api_base_url))?;
    let http = Arc::new(http);
    let credentials = FileCredentialsProvider::new().map_err(|_| SystemError::NoHomeDirectory)?;
    let storage = StorageManager::from_platform()?;
    let loader = Arc::new(
        HttpImageLoader::new(Arc::clone(&http)).with_timeout_secs(config.request_timeout_secs),
    );

    tracing::debug!(
        "API {} (timeout {}s), credentials at {}",
        config.api_base_url,
        config.request_timeout_secs,
        credentials.credentials_path().display()
    );

    let mut app = FolioApp::new(http, credentials, config);
    if let Err(e) = app.restore().await {
        tracing::warn!("Could not restore the stored session: {}", e);
    }
    execute(&mut app, command, &storage, loader).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_and_help_need_no_runtime() {
        assert!(run_cli_command(CliCommand::Version).is_ok());
        assert!(run_cli_command(CliCommand::Help).is_ok());
    }
}
