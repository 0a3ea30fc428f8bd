use galley_core::{Error, Result, ResultsMap, Task, TaskStatus};
use std::collections::HashSet;

/// Indexes of pending tasks whose every dependency id is already a key of
/// the results map. Failed dependencies never appear there, so their
/// dependents stay out of the ready set permanently.
pub(super) fn ready_set(tasks: &[Task], results: &ResultsMap) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| {
            task.status == TaskStatus::Pending
                && task.dependencies.iter().all(|dep| results.contains_key(dep))
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Structural validation of a submitted plan: unique task ids, and every
/// dependency naming a task in the same plan. Business semantics of
/// `service`/`method` are not the engine's concern.
pub(super) fn validate_plan(tasks: &[Task]) -> Result<()> {
    let mut ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !ids.insert(task.id.as_str()) {
            return Err(Error::plan(format!("duplicate task id '{}'", task.id)));
        }
    }
    for task in tasks {
        for dep in &task.dependencies {
            if !ids.contains(dep.as_str()) {
                return Err(Error::plan(format!(
                    "task '{}' depends on unknown task '{dep}'",
                    task.id
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task(id: &str, deps: &[&str]) -> Task {
        Task::new(id, "svc", "method")
            .with_dependencies(deps.iter().map(|d| (*d).to_string()).collect())
    }

    #[test]
    fn roots_are_ready_immediately() {
        let tasks = vec![task("task1", &[]), task("task2", &["task1"])];
        let ready = ready_set(&tasks, &ResultsMap::new());
        assert_eq!(ready, [0]);
    }

    #[test]
    fn dependents_become_ready_once_results_land() {
        let tasks = vec![task("task1", &[]), task("task2", &["task1"])];
        let mut results = ResultsMap::new();
        results.insert("task1".into(), json!({"success": true}));
        let ready = ready_set(&tasks, &results);
        assert_eq!(ready, [1]);
    }

    #[test]
    fn non_pending_tasks_are_excluded() {
        let mut tasks = vec![task("task1", &[]), task("task2", &[])];
        tasks[0].status = TaskStatus::Failed;
        let ready = ready_set(&tasks, &ResultsMap::new());
        assert_eq!(ready, [1]);
    }

    #[test]
    fn cycle_produces_empty_ready_set() {
        let tasks = vec![task("task1", &["task2"]), task("task2", &["task1"])];
        assert!(ready_set(&tasks, &ResultsMap::new()).is_empty());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let tasks = vec![task("task1", &[]), task("task1", &[])];
        let err = validate_plan(&tasks).unwrap_err();
        assert!(err.to_string().contains("duplicate task id"));
    }

    #[test]
    fn unknown_dependency_rejected() {
        let tasks = vec![task("task1", &["task9"])];
        let err = validate_plan(&tasks).unwrap_err();
        assert!(err.to_string().contains("unknown task 'task9'"));
    }

    #[test]
    fn valid_plan_passes() {
        let tasks = vec![task("task1", &[]), task("task2", &["task1"])];
        assert!(validate_plan(&tasks).is_ok());
    }
}
