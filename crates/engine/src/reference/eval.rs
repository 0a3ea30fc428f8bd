//! Evaluation of parsed reference expressions against the results map.
//!
//! Evaluation is pure and total: it never errors and never touches the
//! results map. `None` means "unresolved"; the caller keeps the original
//! parameter value in that case, so one bad reference degrades gracefully
//! instead of failing its task.

use super::expr::{FieldExpr, PathExpr, RefExpr};
use galley_core::ResultsMap;
use serde_json::Value;

pub(super) fn eval(expr: &RefExpr, results: &ResultsMap) -> Option<Value> {
    match expr {
        // Resolved by a later, external stage.
        RefExpr::Session => None,
        RefExpr::Concat(parts) => Some(eval_concat(parts, results)),
        RefExpr::MultiField(fields) => Some(eval_multi_field(fields, results)),
        RefExpr::Field(field) => Some(eval_field(field, results)),
        RefExpr::Path(path) => eval_path(path, results),
        RefExpr::WholeResult { task } => eval_whole_result(task, results),
    }
}

/// Flatten the sides into one list: list results are extended, scalars are
/// appended, unresolvable sides are skipped.
fn eval_concat(parts: &[PathExpr], results: &ResultsMap) -> Value {
    let mut items = Vec::new();
    for part in parts {
        match eval_path(part, results) {
            Some(Value::Array(list)) => items.extend(list),
            Some(value) => items.push(value),
            None => {
                tracing::warn!(task = %part.task, "unresolvable concatenation side skipped");
            }
        }
    }
    Value::Array(items)
}

/// Collect the extracted slot values, dropping empty extractions.
fn eval_multi_field(fields: &[FieldExpr], results: &ResultsMap) -> Value {
    let values = fields
        .iter()
        .map(|field| eval_field(field, results))
        .filter(|value| !matches!(value, Value::String(s) if s.is_empty()))
        .collect();
    Value::Array(values)
}

/// Read `result.data.<slot>` out of a successful envelope; empty string
/// when the task, envelope, or field is absent.
fn eval_field(field: &FieldExpr, results: &ResultsMap) -> Value {
    successful_result(results.get(&field.task))
        .and_then(|result| result.get("data"))
        .and_then(|data| data.get(&field.slot))
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

/// Walk the key segments through the task's raw stored payload. A terminal
/// list of objects that carry a `title` field collapses to the titles.
fn eval_path(path: &PathExpr, results: &ResultsMap) -> Option<Value> {
    let mut current = results.get(&path.task)?;
    for segment in &path.segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(collapse_titles(current).unwrap_or_else(|| current.clone()))
}

fn collapse_titles(value: &Value) -> Option<Value> {
    let items = value.as_array()?;
    let first = items.first()?.as_object()?;
    if !first.contains_key("title") {
        return None;
    }
    let titles = items
        .iter()
        .filter_map(|item| item.get("title").cloned())
        .collect();
    Some(Value::Array(titles))
}

/// Project a successful list-of-records payload to its `item_name` values.
fn eval_whole_result(task: &str, results: &ResultsMap) -> Option<Value> {
    let records = successful_result(results.get(task))?
        .get("data")?
        .as_array()?;
    let names = records
        .iter()
        .filter_map(|record| record.get("item_name"))
        .filter(|name| !matches!(name, Value::String(s) if s.is_empty()))
        .cloned()
        .collect();
    Some(Value::Array(names))
}

/// The `result` member of a `{"success": true, "result": {...}}` envelope.
fn successful_result(payload: Option<&Value>) -> Option<&Value> {
    let envelope = payload?.as_object()?;
    if envelope.get("success")?.as_bool()? {
        envelope.get("result")
    } else {
        None
    }
}
