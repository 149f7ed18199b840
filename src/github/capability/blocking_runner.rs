//! Task runner backed by Tokio's blocking thread pool.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinError;

use super::TaskRunner;
use crate::github::error::ApiError;
use crate::github::task::Task;

/// Runs tasks via `tokio::task::spawn_blocking`.
///
/// The blocking wait happens on a pool worker; the caller only awaits the
/// join handle. An optional limit caps how many tasks from this runner
/// occupy pool workers at once; excess tasks wait asynchronously for a slot.
#[derive(Debug, Clone, Default)]
pub struct BlockingTaskRunner {
    permits: Option<Arc<Semaphore>>,
}

impl BlockingTaskRunner {
    /// Creates a runner with no concurrency limit of its own.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { permits: None }
    }

    /// Creates a runner that executes at most `max_concurrent` tasks at a
    /// time. A limit of zero means unbounded.
    #[must_use]
    pub fn with_limit(max_concurrent: usize) -> Self {
        if max_concurrent == 0 {
            return Self::unbounded();
        }
        Self {
            permits: Some(Arc::new(Semaphore::new(max_concurrent))),
        }
    }

    async fn acquire(&self) -> Result<Option<OwnedSemaphorePermit>, ApiError> {
        let Some(semaphore) = &self.permits else {
            return Ok(None);
        };
        Arc::clone(semaphore)
            .acquire_owned()
            .await
            .map(Some)
            .map_err(|error| ApiError::task(format!("task runner closed: {error}")))
    }
}

#[async_trait]
impl TaskRunner for BlockingTaskRunner {
    async fn run_task(&self, task: Task) -> Result<(), ApiError> {
        let label = task.label();
        let permit = self.acquire().await?;

        tracing::trace!(task = label, "dispatching blocking task");
        tokio::task::spawn_blocking(move || {
            task.execute();
            drop(permit);
        })
        .await
        .map_err(|error| map_join_error(label, &error))?;
        tracing::trace!(task = label, "blocking task completed");

        Ok(())
    }
}

fn map_join_error(label: &str, error: &JoinError) -> ApiError {
    if error.is_panic() {
        ApiError::task(format!("{label} panicked"))
    } else {
        ApiError::task(format!("{label} was cancelled: {error}"))
    }
}
