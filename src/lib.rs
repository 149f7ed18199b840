//! Asynchronous issue client built on injected capabilities.
//!
//! The library fetches a single issue record from a GitHub-compatible API.
//! It does not own the HTTP stack or any worker threads: callers supply an
//! [`HttpClient`] and a [`TaskRunner`], and every failure from either is
//! reported as one tagged [`ApiError`].

pub mod config;
pub mod github;

pub use config::{ConfigError, IssueCourierConfig};
pub use github::{
    ApiClient, ApiError, BlockingTaskRunner, CredentialError, CredentialSource, EnvCredentials,
    HttpClient, Issue, IssueLocator, IssueState, LocatorError, ReqwestHttpClient,
    ReqwestHttpClientConfig, StaticCredentials, Task, TaskRunner, run_task,
};
