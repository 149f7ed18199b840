//! Wiring between configuration, the concrete capabilities, and the client.

use std::sync::Arc;

use issue_courier::{
    ApiClient, ApiError, BlockingTaskRunner, ConfigError, IssueCourierConfig, ReqwestHttpClient,
};
use ortho_config::OrthoConfig;
use thiserror::Error;

mod output;

/// Failures reported by the binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration was missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The issue could not be fetched.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing the summary failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the writer.
        message: String,
    },
}

/// Loads configuration, fetches the configured issue, and prints it.
///
/// # Errors
///
/// Returns [`CliError`] for configuration, fetch, or output failures.
pub async fn run() -> Result<(), CliError> {
    let config = load_config()?;
    let target = config.issue_target()?;

    let http_client = ReqwestHttpClient::new(&config.http_client_config())?;
    let task_runner = BlockingTaskRunner::with_limit(config.max_blocking_tasks);
    let client = ApiClient::new(Arc::new(http_client), Arc::new(task_runner))
        .with_api_base(target.api_base())
        .with_credentials(config.credential_source());

    let issue = client.get_issue_at(&target).await?;
    output::write_issue_summary(&issue)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ConfigError::Load`] when ortho-config fails to parse arguments
/// or load configuration files.
fn load_config() -> Result<IssueCourierConfig, ConfigError> {
    IssueCourierConfig::load().map_err(|error| ConfigError::Load {
        message: error.to_string(),
    })
}
