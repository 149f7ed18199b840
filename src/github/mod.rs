//! Issue retrieval through injected capabilities.
//!
//! [`ApiClient`] owns no transport and no threads. It receives an
//! [`HttpClient`] and a [`TaskRunner`] at construction, awaits them in a
//! fixed order, and funnels every failure into the closed [`ApiError`]
//! taxonomy.

pub mod capability;
pub mod client;
pub mod credentials;
pub mod error;
pub mod locator;
pub mod models;
pub mod task;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use capability::{
    BlockingTaskRunner, HttpClient, ReqwestHttpClient, ReqwestHttpClientConfig, TaskRunner,
};
pub use client::{ApiClient, DEFAULT_API_BASE};
pub use credentials::{CredentialError, CredentialSource, EnvCredentials, StaticCredentials};
pub use error::ApiError;
pub use locator::{IssueLocator, IssueNumber, LocatorError, RepositoryName, RepositoryOwner};
pub use models::{Issue, IssueState};
pub use task::{Task, run_task};

#[cfg(test)]
pub use capability::{MockHttpClient, MockTaskRunner};
#[cfg(test)]
pub use credentials::MockCredentialSource;

#[cfg(test)]
mod tests;
