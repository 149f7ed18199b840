//! Units of synchronous work handed to a [`TaskRunner`].
//!
//! A [`Task`] is opaque to the runner: it only knows how to execute it. The
//! typed result of the work travels back to the awaiting caller through a
//! one-shot channel owned by [`run_task`], so runners stay object-safe and
//! never see the payload type.

use std::fmt;

use tokio::sync::oneshot;

use super::capability::TaskRunner;
use super::error::ApiError;

/// A unit of blocking or CPU-bound work.
///
/// Ownership moves into the runner for the duration of execution; the task
/// shares no mutable state with the caller that created it.
pub struct Task {
    label: &'static str,
    job: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    /// Wraps a closure as a task with a short diagnostic label.
    pub fn new(label: &'static str, job: impl FnOnce() + Send + 'static) -> Self {
        Self {
            label,
            job: Box::new(job),
        }
    }

    /// Diagnostic label used in logs and error messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Runs the work on the current thread.
    ///
    /// Only task runners call this; it may block for as long as the work
    /// takes.
    pub fn execute(self) {
        (self.job)();
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Dispatches `work` through `runner` and awaits its typed result.
///
/// # Errors
///
/// Propagates the runner's own failure unchanged, returns whatever error the
/// work produced, and returns [`ApiError::Task`] when the runner reports
/// success without ever executing the task.
pub async fn run_task<T, F>(
    runner: &dyn TaskRunner,
    label: &'static str,
    work: F,
) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    let (sender, receiver) = oneshot::channel();
    let task = Task::new(label, move || {
        // The receiver is gone when the caller was cancelled mid-flight.
        let _ignored = sender.send(work());
    });

    runner.run_task(task).await?;

    receiver
        .await
        .map_err(|_| ApiError::task(format!("{label} was dropped before completing")))?
}
