//! Wave-based task graph executor.
//!
//! The executor repeatedly computes the set of pending tasks whose
//! dependencies are all satisfied, dispatches that whole wave concurrently
//! through the injected [`ServiceCoordinator`], records outcomes, and
//! decides when to stop, abort, or request confirmation. Tasks in the same
//! wave run with no ordering guarantee relative to each other; a task never
//! starts before every task it depends on has completed.

mod builder;
mod pipeline;
mod ready;

pub use builder::ExecutorBuilder;

use crate::coordinator::{AmbiguityGate, ServiceCoordinator};
use std::sync::Arc;

/// Drives one plan from pending tasks to a terminal [`ExecutionResult`].
///
/// [`ExecutionResult`]: galley_core::ExecutionResult
pub struct Executor {
    pub(crate) coordinator: Arc<dyn ServiceCoordinator>,
    pub(crate) gate: Option<Arc<dyn AmbiguityGate>>,
}

impl Executor {
    /// Create an executor with no ambiguity gate; plans run unchecked.
    #[must_use]
    pub fn new(coordinator: Arc<dyn ServiceCoordinator>) -> Self {
        Self {
            coordinator,
            gate: None,
        }
    }

    /// Start building an executor with injected collaborators.
    #[must_use]
    pub fn builder() -> ExecutorBuilder {
        ExecutorBuilder::new()
    }
}
