use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Task id → raw returned payload, appended monotonically as tasks complete.
///
/// Only the scheduling loop ever writes to it; the reference resolver reads
/// it and never mutates it.
pub type ResultsMap = IndexMap<String, Value>;

/// Lifecycle state of a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One planned invocation of an external service method, with declared
/// dependencies on other tasks in the same plan.
///
/// Created by the planner, mutated only by the executor, discarded at the
/// end of one planning/execution cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub service: String,
    pub method: String,
    /// Ordered parameter map; values may be literals, lists, or reference
    /// expressions naming prior task outputs.
    #[serde(default)]
    pub parameters: IndexMap<String, Value>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Task {
    /// Create a pending task with no parameters or dependencies
    #[must_use]
    pub fn new(id: impl Into<String>, service: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            service: service.into(),
            method: method.into(),
            parameters: IndexMap::new(),
            dependencies: Vec::new(),
            status: TaskStatus::Pending,
            result: None,
            error: None,
        }
    }

    /// Set the declared parameters
    #[must_use]
    pub fn with_parameters(mut self, parameters: IndexMap<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set the declared dependency ids
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

/// Terminal status of one execution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Success,
    NeedsConfirmation,
    Error,
}

/// The engine's single terminal output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    /// Full results map on success, empty otherwise
    #[serde(default)]
    pub outputs: ResultsMap,
    /// Opaque payload for the ambiguity gate's caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_context: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ExecutionResult {
    /// Successful run with the accumulated results map
    #[must_use]
    pub fn success(outputs: ResultsMap) -> Self {
        Self {
            status: ExecutionStatus::Success,
            outputs,
            confirmation_context: None,
            message: None,
        }
    }

    /// The plan needs user clarification before (re)execution
    #[must_use]
    pub fn needs_confirmation(context: Value, message: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::NeedsConfirmation,
            outputs: ResultsMap::new(),
            confirmation_context: Some(context),
            message: Some(message.into()),
        }
    }

    /// Fatal run failure with a human-readable message
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::Error,
            outputs: ResultsMap::new(),
            confirmation_context: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_deserializes_with_defaults() {
        let task: Task = serde_json::from_value(json!({
            "id": "task1",
            "service": "inventory_service",
            "method": "list_items",
        }))
        .unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.parameters.is_empty());
        assert!(task.dependencies.is_empty());
        assert!(task.result.is_none());
    }

    #[test]
    fn task_serialization_skips_empty_outcome_fields() {
        let task = Task::new("task1", "inventory_service", "list_items");
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["status"], "pending");
        assert!(value.get("result").is_none());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn parameters_preserve_planner_order() {
        let task: Task = serde_json::from_value(json!({
            "id": "task2",
            "service": "recipe_service",
            "method": "generate_menu_plan",
            "parameters": {"inventory_items": "task1.result", "menu_type": "dinner"},
        }))
        .unwrap();
        let keys: Vec<&String> = task.parameters.keys().collect();
        assert_eq!(keys, ["inventory_items", "menu_type"]);
    }

    #[test]
    fn execution_status_uses_snake_case() {
        let status = serde_json::to_value(ExecutionStatus::NeedsConfirmation).unwrap();
        assert_eq!(status, "needs_confirmation");
    }
}
