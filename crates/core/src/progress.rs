//! Progress reporting seam for the executor.
//!
//! The executor emits fire-and-forget notifications through an injected
//! [`ProgressReporter`] instead of any ambient sink, so embedders can route
//! them to SSE streams, UIs, or nothing at all. A reporter must never be
//! able to fail the run: every callback is infallible by construction.

use crate::types::TaskStatus;
use serde_json::Value;

/// Payload accompanying a status transition.
#[derive(Debug, Clone, Copy)]
pub enum StatusDetail<'a> {
    /// Nothing to attach (e.g. the transition to running)
    None,
    /// The task's returned payload, on completion
    Output(&'a Value),
    /// The recorded error message, on failure
    Error(&'a str),
}

/// Observability callbacks invoked by the executor.
///
/// Implementations must be cheap and non-blocking; the executor calls them
/// inline from the scheduling loop.
pub trait ProgressReporter: Send + Sync {
    /// A task transitioned to `status`
    fn on_status_change(&self, task_id: &str, status: TaskStatus, detail: StatusDetail<'_>);

    /// `completed` tasks finished in the wave that just settled
    fn on_steps_completed(&self, completed: usize);

    /// A run-aborting error message, surfaced before the executor returns
    fn on_error(&self, message: &str);
}

/// Reporter that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn on_status_change(&self, _task_id: &str, _status: TaskStatus, _detail: StatusDetail<'_>) {}

    fn on_steps_completed(&self, _completed: usize) {}

    fn on_error(&self, _message: &str) {}
}

/// Reporter that forwards every notification to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn on_status_change(&self, task_id: &str, status: TaskStatus, detail: StatusDetail<'_>) {
        match detail {
            StatusDetail::None => {
                tracing::info!(task_id, status = %status, "task status changed");
            }
            StatusDetail::Output(output) => {
                tracing::info!(task_id, status = %status, %output, "task status changed");
            }
            StatusDetail::Error(error) => {
                tracing::warn!(task_id, status = %status, error, "task status changed");
            }
        }
    }

    fn on_steps_completed(&self, completed: usize) {
        tracing::info!(completed, "wave settled");
    }

    fn on_error(&self, message: &str) {
        tracing::error!(error = message, "execution aborted");
    }
}
