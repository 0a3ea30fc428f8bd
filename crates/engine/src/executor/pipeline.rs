use super::ready::{ready_set, validate_plan};
use super::Executor;
use crate::coordinator::InvokeFailure;
use crate::reference::resolve_parameters;
use futures::future::join_all;
use galley_core::{
    ExecutionResult, ProgressReporter, Result, ResultsMap, StatusDetail, Task, TaskStatus,
};
use serde_json::json;
use std::sync::Arc;

impl Executor {
    /// Execute a plan to completion and return its terminal result.
    ///
    /// Never fails at the boundary: internal errors (circular dependency,
    /// invalid plan shape) are folded into an error-status result, the way
    /// the two fast-abort failure classes are folded into theirs.
    pub async fn execute(
        &self,
        tasks: Vec<Task>,
        identity: &str,
        reporter: &dyn ProgressReporter,
        credential: &str,
    ) -> ExecutionResult {
        tracing::info!(tasks = tasks.len(), "starting task graph execution");
        match self.run(tasks, identity, reporter, credential).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(error = %err, "task graph execution failed");
                ExecutionResult::error(err.to_string())
            }
        }
    }

    async fn run(
        &self,
        mut tasks: Vec<Task>,
        identity: &str,
        reporter: &dyn ProgressReporter,
        credential: &str,
    ) -> Result<ExecutionResult> {
        validate_plan(&tasks)?;

        // Pre-check: nothing may be dispatched for an ambiguous plan. The
        // original, unmodified task list rides along in the confirmation
        // context so the caller can resubmit after clarification.
        if let Some(gate) = &self.gate {
            tracing::debug!(tasks = tasks.len(), identity, "checking plan for ambiguity");
            let report = gate.check(&tasks, identity, credential).await;
            if let Some(first) = report.first() {
                tracing::info!(task_id = %first.task_id, "plan is ambiguous; requesting confirmation");
                let context = json!({
                    "ambiguity_info": serde_json::to_value(first)?,
                    "user_response": "",
                    "original_tasks": serde_json::to_value(&tasks)?,
                });
                return Ok(ExecutionResult::needs_confirmation(
                    context,
                    first.message.clone(),
                ));
            }
        }

        for task in &tasks {
            tracing::debug!(
                id = %task.id,
                service = %task.service,
                method = %task.method,
                dependencies = ?task.dependencies,
                "planned task"
            );
        }

        let mut results = ResultsMap::new();
        let mut wave = 0usize;

        loop {
            let ready = ready_set(&tasks, &results);
            if ready.is_empty() {
                let pending: Vec<String> = tasks
                    .iter()
                    .filter(|task| task.status == TaskStatus::Pending)
                    .map(|task| task.id.clone())
                    .collect();
                if pending.is_empty() {
                    break;
                }
                return Err(galley_core::Error::circular_dependency(pending));
            }

            wave += 1;
            tracing::debug!(
                wave,
                tasks = ?ready.iter().map(|&idx| tasks[idx].id.as_str()).collect::<Vec<_>>(),
                "dispatching wave"
            );

            // Launch the whole wave, then await every outcome before acting
            // on any of them; a slow or failing dispatch never cancels its
            // siblings mid-flight.
            let mut dispatches = Vec::with_capacity(ready.len());
            for &idx in &ready {
                let task = &mut tasks[idx];
                task.status = TaskStatus::Running;
                reporter.on_status_change(&task.id, TaskStatus::Running, StatusDetail::None);

                let parameters = resolve_parameters(&task.parameters, &results);
                let coordinator = Arc::clone(&self.coordinator);
                let service = task.service.clone();
                let method = task.method.clone();
                dispatches.push(async move {
                    coordinator
                        .invoke(&service, &method, parameters, credential)
                        .await
                });
            }
            let outcomes = join_all(dispatches).await;

            let mut completed = 0usize;
            for (&idx, outcome) in ready.iter().zip(outcomes) {
                match outcome {
                    Ok(value) => {
                        let task = &mut tasks[idx];
                        task.status = TaskStatus::Completed;
                        task.result = Some(value.clone());
                        reporter.on_status_change(
                            &task.id,
                            TaskStatus::Completed,
                            StatusDetail::Output(&value),
                        );
                        results.insert(task.id.clone(), value);
                        completed += 1;
                    }
                    Err(InvokeFailure::NeedsConfirmation { message, context }) => {
                        tracing::info!(
                            task_id = %tasks[idx].id,
                            "ambiguity detected during dispatch; pausing run"
                        );
                        return Ok(ExecutionResult::needs_confirmation(context, message));
                    }
                    Err(InvokeFailure::QuotaExceeded { message }) => {
                        let task = &mut tasks[idx];
                        task.status = TaskStatus::Failed;
                        task.error = Some(message.clone());
                        reporter.on_status_change(
                            &task.id,
                            TaskStatus::Failed,
                            StatusDetail::Error(&message),
                        );
                        reporter.on_error(&message);
                        tracing::warn!(task_id = %task.id, "usage limit exceeded; aborting run");
                        return Ok(ExecutionResult::error(message));
                    }
                    Err(InvokeFailure::Failed { message }) => {
                        let task = &mut tasks[idx];
                        task.status = TaskStatus::Failed;
                        task.error = Some(message.clone());
                        reporter.on_status_change(
                            &task.id,
                            TaskStatus::Failed,
                            StatusDetail::Error(&message),
                        );
                        tracing::warn!(task_id = %task.id, error = %message, "task failed");
                    }
                }
            }

            if completed > 0 {
                reporter.on_steps_completed(completed);
            }
            tracing::debug!(
                wave,
                processed = ready.len(),
                completed,
                remaining = tasks
                    .iter()
                    .filter(|task| task.status == TaskStatus::Pending)
                    .count(),
                "wave settled"
            );
        }

        tracing::info!(outputs = results.len(), "task graph execution completed");
        Ok(ExecutionResult::success(results))
    }
}
