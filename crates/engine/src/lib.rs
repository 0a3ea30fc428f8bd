//! Task graph execution engine for galley.
//!
//! Given a plan, a list of heterogeneous, interdependent service
//! invocations produced by an external planning step, this crate resolves
//! data dependencies between tasks, runs independent tasks concurrently in
//! waves, injects prior task outputs into later task parameters through a
//! small reference-expression language, and drives the ambiguity / quota /
//! failure control flow around the run.
//!
//! The engine is a library, not a service: the planner, the concrete
//! service implementations, and any transport layer are external
//! collaborators injected through the traits in [`coordinator`].

pub mod coordinator;
pub mod executor;
pub mod reference;

pub use coordinator::{
    AmbiguityGate, AmbiguityReport, AmbiguousTask, InvokeFailure, ServiceCoordinator,
};
pub use executor::{Executor, ExecutorBuilder};
pub use reference::{resolve_parameters, RefExpr};
