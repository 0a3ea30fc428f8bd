use super::Executor;
use crate::coordinator::{AmbiguityGate, ServiceCoordinator};
use galley_core::{Error, Result};
use std::sync::Arc;

/// Builder for creating an [`Executor`] with injected collaborators.
#[derive(Default)]
pub struct ExecutorBuilder {
    coordinator: Option<Arc<dyn ServiceCoordinator>>,
    gate: Option<Arc<dyn AmbiguityGate>>,
}

impl ExecutorBuilder {
    /// Create a new executor builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service coordinator that performs task operations
    #[must_use]
    pub fn with_coordinator(mut self, coordinator: Arc<dyn ServiceCoordinator>) -> Self {
        self.coordinator = Some(coordinator);
        self
    }

    /// Set the ambiguity gate consulted before any task runs
    #[must_use]
    pub fn with_ambiguity_gate(mut self, gate: Arc<dyn AmbiguityGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Build the executor; fails if no coordinator was provided
    pub fn build(self) -> Result<Executor> {
        let coordinator = self
            .coordinator
            .ok_or_else(|| Error::configuration("executor requires a service coordinator"))?;
        Ok(Executor {
            coordinator,
            gate: self.gate,
        })
    }
}
