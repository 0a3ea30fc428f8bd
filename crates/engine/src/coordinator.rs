//! External collaborator seams: the service coordinator that performs the
//! actual operations, and the ambiguity gate that pre-checks plans.
//!
//! The executor treats both as opaque async calls. Failure classes are
//! tagged variants rather than string markers, so outcome handling in the
//! scheduling loop is a plain pattern match.

use async_trait::async_trait;
use galley_core::Task;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Failure returned by a service dispatch.
///
/// The two fast-abort classes short-circuit the remainder of the run; any
/// task can raise either, so they are detected here rather than from task
/// metadata.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvokeFailure {
    /// The operation found the request too ambiguous to act on; the run
    /// must pause and ask the user. Control flow, not a bug.
    #[error("{message}")]
    NeedsConfirmation {
        message: String,
        /// Opaque payload handed back to the gate's caller for resubmission
        context: Value,
    },

    /// A business-rule usage limit was hit; the run stops and the message
    /// is surfaced to the user verbatim.
    #[error("{message}")]
    QuotaExceeded { message: String },

    /// Any other dispatch failure; contained to the failing task.
    #[error("{message}")]
    Failed { message: String },
}

/// Performs one `(service, method)` operation against the outside world.
///
/// Timeouts and retries, if any, are the coordinator's responsibility, not
/// the executor's.
#[async_trait]
pub trait ServiceCoordinator: Send + Sync {
    async fn invoke(
        &self,
        service: &str,
        method: &str,
        parameters: IndexMap<String, Value>,
        credential: &str,
    ) -> Result<Value, InvokeFailure>;
}

/// One task the gate flagged as too ambiguous to execute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbiguousTask {
    pub task_id: String,
    /// Human-readable question for the user
    pub message: String,
    /// Gate-specific detail payload
    #[serde(default)]
    pub details: Value,
}

/// Outcome of the pre-execution ambiguity check.
#[derive(Debug, Clone, Default)]
pub struct AmbiguityReport {
    /// Flagged tasks, in plan order; empty means the plan may run
    pub ambiguous: Vec<AmbiguousTask>,
}

impl AmbiguityReport {
    /// Report that clears the plan for execution
    #[must_use]
    pub fn unambiguous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn requires_confirmation(&self) -> bool {
        !self.ambiguous.is_empty()
    }

    /// The first flagged task, whose details are surfaced to the caller
    #[must_use]
    pub fn first(&self) -> Option<&AmbiguousTask> {
        self.ambiguous.first()
    }
}

/// Decides whether a plan is unambiguous enough to execute.
#[async_trait]
pub trait AmbiguityGate: Send + Sync {
    async fn check(&self, tasks: &[Task], identity: &str, credential: &str) -> AmbiguityReport;
}
