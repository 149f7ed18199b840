//! Capabilities the issue client depends on but does not own.
//!
//! [`HttpClient`] performs the network fetch and [`TaskRunner`] executes
//! blocking work on whatever execution context it manages. Both are injected
//! into [`crate::ApiClient`] at construction. The crate ships one production
//! implementation of each: [`ReqwestHttpClient`] and [`BlockingTaskRunner`].

mod blocking_runner;
mod error_mapping;
mod reqwest_http;

pub use blocking_runner::BlockingTaskRunner;
pub use reqwest_http::{ReqwestHttpClient, ReqwestHttpClientConfig};

use async_trait::async_trait;

use super::error::ApiError;
use super::task::Task;

/// Asynchronous fetch of a single resource body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetches `url`, authenticating with the opaque `credentials` string.
    ///
    /// The credential format is defined by the implementation; callers pass
    /// it through untouched. The call resolves exactly once.
    async fn fetch(&self, url: &str, credentials: &str) -> Result<String, ApiError>;
}

/// Asynchronous execution of a [`Task`].
///
/// Implementations may run the task on a separate worker and block that
/// worker until it finishes, but must not block the awaiting caller's
/// context while doing so.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRunner: Send + Sync {
    /// Executes `task`, resolving once it has run to completion.
    async fn run_task(&self, task: Task) -> Result<(), ApiError>;
}
