//! Core domain types, errors, and progress events for `galley`.
//!
//! This crate establishes the foundational data structures and error
//! handling used by the execution engine. It carries no execution logic.
//!
//! ## Key Components
//!
//! - **`errors`**: the primary `Error` enum and `Result` type alias,
//!   centralizing all failure modes the engine itself can produce.
//! - **`types`**: the task graph data model: `Task`, `TaskStatus`,
//!   `ResultsMap`, and the terminal `ExecutionResult`.
//! - **`progress`**: the injected `ProgressReporter` seam for
//!   fire-and-forget observability notifications.

pub mod errors;
pub mod progress;
pub mod types;

pub use self::{
    errors::{Error, Result},
    progress::{NullReporter, ProgressReporter, StatusDetail, TracingReporter},
    types::{ExecutionResult, ExecutionStatus, ResultsMap, Task, TaskStatus},
};
