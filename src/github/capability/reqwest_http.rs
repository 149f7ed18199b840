//! HTTP capability implemented with reqwest.

use std::time::Duration;

use async_trait::async_trait;
use http::header::ACCEPT;
use reqwest::{Client, RequestBuilder};

use super::HttpClient;
use super::error_mapping::map_status_error;
use crate::github::error::ApiError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("issue-courier/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Configuration for [`ReqwestHttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReqwestHttpClientConfig {
    /// Total request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value; GitHub rejects requests without one.
    pub user_agent: String,
}

impl Default for ReqwestHttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// reqwest-backed [`HttpClient`].
///
/// Credentials of the form `user:pass` are sent as basic auth, any other
/// non-empty value as a bearer token, and an empty value sends no
/// `Authorization` header at all.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Builds a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] when reqwest cannot initialise its TLS
    /// backend or connection settings.
    pub fn new(config: &ReqwestHttpClientConfig) -> Result<Self, ApiError> {
        Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map(|client| Self { client })
            .map_err(|error| ApiError::http(format!("failed to configure HTTP client: {error}")))
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn fetch(&self, url: &str, credentials: &str) -> Result<String, ApiError> {
        let request = apply_credentials(self.client.get(url).header(ACCEPT, GITHUB_JSON), credentials);

        let response = request
            .send()
            .await
            .map_err(|error| ApiError::http(format!("GET {url} failed: {error}")))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| ApiError::http(format!("reading body from {url} failed: {error}")))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(map_status_error(url, status, &body))
        }
    }
}

fn apply_credentials(builder: RequestBuilder, credentials: &str) -> RequestBuilder {
    if credentials.is_empty() {
        return builder;
    }
    if let Some((user, password)) = credentials.split_once(':') {
        return builder.basic_auth(user, Some(password));
    }
    builder.bearer_auth(credentials)
}
