//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach, lowest to highest
//! precedence:
//!
//! 1. **Defaults** – built-in application defaults
//! 2. **Configuration file** – `.issue-courier.toml` in the current
//!    directory, home directory, or XDG config directory
//! 3. **Environment variables** – `ISSUE_COURIER_*`
//! 4. **Command-line arguments** – `--issue-url`/`-u`, `--owner`/`-o`, ...
//!
//! # Configuration File
//!
//! ```toml
//! issue_url = "https://github.com/mozilla/uniffi-rs/issues/2017"
//! credentials = "username:password"
//! api_base = "https://api.github.com"
//! timeout_seconds = 30
//! max_blocking_tasks = 4
//! ```

use std::sync::Arc;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::github::{
    CredentialSource, DEFAULT_API_BASE, EnvCredentials, IssueLocator, IssueNumber, LocatorError,
    RepositoryName, RepositoryOwner, ReqwestHttpClientConfig, StaticCredentials,
};

/// Environment variable read when no credentials are configured.
pub const GITHUB_TOKEN_VARIABLE: &str = "GITHUB_TOKEN";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_MAX_BLOCKING_TASKS: usize = 4;

/// Errors raised while turning configuration into a request target.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration sources could not be loaded or merged.
    #[error("configuration error: {message}")]
    Load {
        /// Details from ortho-config.
        message: String,
    },

    /// Neither an issue URL nor a complete owner/repo/number triple was set.
    #[error("issue target is incomplete: {message}")]
    MissingTarget {
        /// Which part is missing.
        message: String,
    },

    /// The issue URL or one of its parts was rejected.
    #[error(transparent)]
    InvalidTarget(#[from] LocatorError),

    /// The API base is not a valid absolute URL.
    #[error("API base URL is invalid: {message}")]
    InvalidApiBase {
        /// Parser detail.
        message: String,
    },
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `ISSUE_COURIER_ISSUE_URL` or `--issue-url`: full issue URL
/// - `ISSUE_COURIER_OWNER` / `ISSUE_COURIER_REPO` / `ISSUE_COURIER_NUMBER`:
///   issue coordinates when no URL is given
/// - `ISSUE_COURIER_CREDENTIALS` or `--credentials`: opaque credentials;
///   `GITHUB_TOKEN` is read at request time when unset, and requests go
///   out anonymously when that is missing too
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "ISSUE_COURIER",
    discovery(
        dotfile_name = ".issue-courier.toml",
        config_file_name = "issue-courier.toml",
        app_name = "issue-courier"
    )
)]
pub struct IssueCourierConfig {
    /// Issue URL such as `https://github.com/owner/repo/issues/1`.
    #[ortho_config(cli_short = 'u')]
    pub issue_url: Option<String>,

    /// Repository owner, used with `repo` and `number`.
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name, used with `owner` and `number`.
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Issue number, used with `owner` and `repo`.
    #[ortho_config(cli_short = 'n')]
    pub number: Option<u64>,

    /// Credentials passed verbatim to the HTTP client (`user:pass` or a
    /// token).
    #[ortho_config(cli_short = 'c')]
    pub credentials: Option<String>,

    /// API base URL for owner/repo/number targets.
    #[ortho_config()]
    pub api_base: String,

    /// HTTP timeout in seconds.
    #[ortho_config()]
    pub timeout_seconds: u64,

    /// Maximum number of blocking tasks run at once; zero removes the limit.
    #[ortho_config()]
    pub max_blocking_tasks: usize,
}

impl Default for IssueCourierConfig {
    fn default() -> Self {
        Self {
            issue_url: None,
            owner: None,
            repo: None,
            number: None,
            credentials: None,
            api_base: DEFAULT_API_BASE.to_owned(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_blocking_tasks: DEFAULT_MAX_BLOCKING_TASKS,
        }
    }
}

impl IssueCourierConfig {
    /// Resolves which issue to fetch.
    ///
    /// `issue_url` wins when present and brings its own API base; otherwise
    /// `owner`, `repo` and `number` are combined with `api_base`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingTarget`] when the coordinates are
    /// incomplete, [`ConfigError::InvalidTarget`] when they are rejected, and
    /// [`ConfigError::InvalidApiBase`] when `api_base` does not parse.
    pub fn issue_target(&self) -> Result<IssueLocator, ConfigError> {
        if let Some(issue_url) = self.issue_url.as_deref() {
            return Ok(IssueLocator::parse(issue_url)?);
        }

        let owner = self.owner.as_deref().ok_or_else(|| missing("owner (use --owner or -o)"))?;
        let repo = self.repo.as_deref().ok_or_else(|| missing("repo (use --repo or -r)"))?;
        let number = self.number.ok_or_else(|| missing("number (use --number or -n)"))?;

        Ok(IssueLocator::new(
            self.api_base_url()?,
            RepositoryOwner::new(owner)?,
            RepositoryName::new(repo)?,
            IssueNumber::new(number)?,
        ))
    }

    /// Parses the configured API base.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiBase`] when the value is not an
    /// absolute URL.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api_base).map_err(|error| ConfigError::InvalidApiBase {
            message: format!("{}: {error}", self.api_base),
        })
    }

    /// Credential source for the client: the configured value, or
    /// `GITHUB_TOKEN` read when the request is made.
    ///
    /// When neither is set the request is sent anonymously, which is enough
    /// for public issues.
    #[must_use]
    pub fn credential_source(&self) -> Arc<dyn CredentialSource> {
        if let Some(value) = self.credentials.as_deref() {
            return Arc::new(StaticCredentials::new(value));
        }
        Arc::new(EnvCredentials::optional(GITHUB_TOKEN_VARIABLE))
    }

    /// HTTP client settings derived from this configuration.
    #[must_use]
    pub fn http_client_config(&self) -> ReqwestHttpClientConfig {
        ReqwestHttpClientConfig {
            timeout: Duration::from_secs(self.timeout_seconds),
            ..ReqwestHttpClientConfig::default()
        }
    }
}

fn missing(part: &str) -> ConfigError {
    ConfigError::MissingTarget {
        message: format!("issue URL or {part} is required"),
    }
}

#[cfg(test)]
mod tests;
