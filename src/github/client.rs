//! Issue client orchestrating the injected capabilities.

use std::sync::Arc;

use url::Url;

use super::capability::{HttpClient, TaskRunner};
use super::credentials::{CredentialSource, StaticCredentials};
use super::error::ApiError;
use super::locator::IssueLocator;
use super::models::Issue;
use super::task::run_task;

/// API base used unless [`ApiClient::with_api_base`] overrides it.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Fetches issues through one [`HttpClient`] and one [`TaskRunner`].
///
/// Both capabilities are bound at construction and never replaced. The
/// client holds no mutable state, so one instance may serve any number of
/// concurrent [`ApiClient::get_issue`] calls.
///
/// Dropping a `get_issue` future cancels the call at its current await
/// point. A credential task already running on a worker finishes there and
/// its result is discarded.
pub struct ApiClient {
    http_client: Arc<dyn HttpClient>,
    task_runner: Arc<dyn TaskRunner>,
    credentials: Arc<dyn CredentialSource>,
    api_base: String,
}

impl ApiClient {
    /// Creates a client against [`DEFAULT_API_BASE`] with anonymous
    /// credentials.
    #[must_use]
    pub fn new(http_client: Arc<dyn HttpClient>, task_runner: Arc<dyn TaskRunner>) -> Self {
        Self {
            http_client,
            task_runner,
            credentials: Arc::new(StaticCredentials::anonymous()),
            api_base: DEFAULT_API_BASE.to_owned(),
        }
    }

    /// Replaces the credential source.
    #[must_use]
    pub fn with_credentials(mut self, source: Arc<dyn CredentialSource>) -> Self {
        self.credentials = source;
        self
    }

    /// Replaces the API base, for GitHub Enterprise or test servers.
    ///
    /// Any query or fragment on `api_base` is discarded.
    #[must_use]
    pub fn with_api_base(mut self, api_base: &Url) -> Self {
        let mut base = api_base.clone();
        base.set_query(None);
        base.set_fragment(None);
        base.as_str()
            .trim_end_matches('/')
            .clone_into(&mut self.api_base);
        self
    }

    /// API base every request URL starts with.
    #[must_use]
    pub const fn api_base(&self) -> &str {
        self.api_base.as_str()
    }

    /// Builds the resource URL for an issue.
    ///
    /// `owner` and `repo` are each kept to a single path segment: `/`, `?`,
    /// `#` and `%` are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] when `owner` or `repo` is `.` or `..`, or
    /// when the API base cannot take a path.
    pub fn issue_url(&self, owner: &str, repo: &str, number: u64) -> Result<Url, ApiError> {
        if let Some(segment) = [owner, repo].into_iter().find(|part| is_dot_segment(part)) {
            return Err(ApiError::http(format!(
                "cannot build issue URL: {segment:?} is not a valid path segment"
            )));
        }

        let mut url = Url::parse(&self.api_base).map_err(|error| {
            ApiError::http(format!("API base {} is invalid: {error}", self.api_base))
        })?;
        let number = number.to_string();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::http(format!("API base {} cannot take a path", self.api_base))
            })?
            .pop_if_empty()
            .extend(["repos", owner, repo, "issues", number.as_str()]);
        Ok(url)
    }

    /// Fetches and decodes a single issue.
    ///
    /// The URL is built first, then credentials are loaded as a task on the
    /// runner, then the issue is fetched and decoded. Each step completes
    /// before the next begins and the first failure is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Task`] when credential loading fails,
    /// [`ApiError::Http`] when the URL cannot be built or the fetch fails,
    /// and [`ApiError::Decode`] when the body is not a valid issue.
    pub async fn get_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue, ApiError> {
        let url = self
            .issue_url(owner, repo, number)
            .inspect_err(|error| log_failure("build issue URL", error))?;

        let credentials = self
            .load_credentials()
            .await
            .inspect_err(|error| log_failure("load credentials", error))?;

        tracing::debug!(%url, "fetching issue");
        let body = self
            .http_client
            .fetch(url.as_str(), &credentials)
            .await
            .inspect_err(|error| log_failure("fetch issue", error))?;

        let issue =
            Issue::from_json(&body).inspect_err(|error| log_failure("decode issue", error))?;
        tracing::debug!(%url, number = issue.number, "decoded issue");

        Ok(issue)
    }

    /// Fetches the issue a parsed locator points at.
    ///
    /// The client's own API base is used; build the client with
    /// [`ApiClient::with_api_base`] and [`IssueLocator::api_base`] to follow
    /// the locator's host.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_issue`].
    pub async fn get_issue_at(&self, locator: &IssueLocator) -> Result<Issue, ApiError> {
        self.get_issue(
            locator.owner().as_str(),
            locator.repository().as_str(),
            locator.number().get(),
        )
        .await
    }

    async fn load_credentials(&self) -> Result<String, ApiError> {
        let source = Arc::clone(&self.credentials);
        run_task(self.task_runner.as_ref(), "load credentials", move || {
            source
                .load()
                .map_err(|error| ApiError::task(format!("loading credentials failed: {error}")))
        })
        .await
    }
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

fn log_failure(step: &str, error: &ApiError) {
    tracing::debug!(step, kind = error.kind(), %error, "issue request failed");
}
