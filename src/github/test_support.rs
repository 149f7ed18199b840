//! In-memory capabilities for exercising [`crate::ApiClient`] without a
//! network or a thread pool of its own.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::oneshot;

use super::capability::{HttpClient, TaskRunner};
use super::error::ApiError;
use super::task::Task;

/// Issue URL used by the reference end-to-end scenario.
pub const SAMPLE_ISSUE_URL: &str = "https://api.github.com/repos/mozilla/uniffi-rs/issues/2017";

/// Title served for [`SAMPLE_ISSUE_URL`].
pub const SAMPLE_ISSUE_TITLE: &str = "Foreign-implemented async traits";

/// Credentials the reference scenario expects.
pub const SAMPLE_CREDENTIALS: &str = "username:password";

/// Builds a representative issue payload with extra fields the client must
/// ignore.
#[must_use]
pub fn issue_payload(number: u64, title: &str) -> String {
    json!({
        "url": format!("https://api.github.com/repos/mozilla/uniffi-rs/issues/{number}"),
        "html_url": format!("https://github.com/mozilla/uniffi-rs/issues/{number}"),
        "number": number,
        "title": title,
        "state": "open",
        "body": "Allow foreign code to implement async trait methods.",
        "user": { "login": "bendk", "id": 1 },
        "labels": [],
        "comments": 3
    })
    .to_string()
}

/// Fake [`HttpClient`] serving canned bodies for exact URLs.
///
/// Credentials are checked before the URL, mirroring how a real service
/// authenticates before routing.
#[derive(Debug)]
pub struct FakeHttpClient {
    expected_credentials: String,
    routes: HashMap<String, String>,
    latency: Option<Duration>,
    requests: Mutex<Vec<String>>,
}

impl FakeHttpClient {
    /// Creates a fake that accepts only `expected_credentials`.
    pub fn new(expected_credentials: impl Into<String>) -> Self {
        Self {
            expected_credentials: expected_credentials.into(),
            routes: HashMap::new(),
            latency: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fake preloaded with the reference issue.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(SAMPLE_CREDENTIALS).with_route(SAMPLE_ISSUE_URL, issue_payload(2017, SAMPLE_ISSUE_TITLE))
    }

    /// Serves `body` for `url`.
    #[must_use]
    pub fn with_route(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.routes.insert(url.into(), body.into());
        self
    }

    /// Suspends every fetch for `latency` before answering.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// URLs requested so far, in arrival order.
    #[must_use]
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn fetch(&self, url: &str, credentials: &str) -> Result<String, ApiError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_owned());
        }

        if credentials != self.expected_credentials {
            return Err(ApiError::http("Unauthorized"));
        }

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.routes
            .get(url)
            .cloned()
            .ok_or_else(|| ApiError::http(format!("Wrong URL: {url}")))
    }
}

/// Runs each task on the awaiting task's own thread.
#[derive(Debug, Default)]
pub struct InlineTaskRunner {
    executed: AtomicUsize,
}

impl InlineTaskRunner {
    /// Number of tasks executed so far.
    #[must_use]
    pub fn executed(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskRunner for InlineTaskRunner {
    async fn run_task(&self, task: Task) -> Result<(), ApiError> {
        task.execute();
        self.executed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Runs each task on a freshly spawned OS thread outside any async runtime
/// and bridges completion back through a one-shot channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadTaskRunner;

#[async_trait]
impl TaskRunner for ThreadTaskRunner {
    async fn run_task(&self, task: Task) -> Result<(), ApiError> {
        let label = task.label();
        let (done, finished) = oneshot::channel();
        thread::Builder::new()
            .name(format!("task-{label}"))
            .spawn(move || {
                task.execute();
                let _ignored = done.send(());
            })
            .map_err(|error| ApiError::task(format!("failed to spawn worker: {error}")))?;

        finished
            .await
            .map_err(|_| ApiError::task(format!("{label} panicked on its worker")))
    }
}

/// Accepts tasks and silently drops them without executing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DroppingTaskRunner;

#[async_trait]
impl TaskRunner for DroppingTaskRunner {
    async fn run_task(&self, task: Task) -> Result<(), ApiError> {
        drop(task);
        Ok(())
    }
}

/// Rejects every task with a fixed [`ApiError::Task`].
#[derive(Debug, Clone)]
pub struct FailingTaskRunner {
    message: String,
}

impl FailingTaskRunner {
    /// Creates a runner that fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl TaskRunner for FailingTaskRunner {
    async fn run_task(&self, task: Task) -> Result<(), ApiError> {
        drop(task);
        Err(ApiError::task(self.message.clone()))
    }
}
