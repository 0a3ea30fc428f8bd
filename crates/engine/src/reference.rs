//! Inter-task reference resolver.
//!
//! Rewrites a task's declared parameters by substituting reference
//! expressions (strings like `"task2.result.main_dish"`) with concrete
//! values pulled from the results map of already-completed tasks. Pure
//! function library: no side effects, no I/O, never errors, never mutates
//! the results map. Resolving the same parameters against the same results
//! map always yields identical output.

mod eval;
mod expr;

pub use expr::{FieldExpr, PathExpr, RefExpr};

use eval::eval;
use galley_core::ResultsMap;
use indexmap::IndexMap;
use serde_json::Value;

/// Resolve every reference expression in `parameters` against `results`.
///
/// String values are parsed with [`RefExpr::parse`]; literals and
/// unresolvable references keep their original value (the dish-slot field
/// shortcut degrades to an empty string instead). List values are resolved
/// element-wise with the same rules. Everything else passes through
/// untouched.
#[must_use]
pub fn resolve_parameters(
    parameters: &IndexMap<String, Value>,
    results: &ResultsMap,
) -> IndexMap<String, Value> {
    parameters
        .iter()
        .map(|(name, value)| (name.clone(), resolve_value(value, results)))
        .collect()
}

fn resolve_value(value: &Value, results: &ResultsMap) -> Value {
    match value {
        Value::String(raw) => match RefExpr::parse(raw) {
            Some(expr) => eval(&expr, results).unwrap_or_else(|| value.clone()),
            None => value.clone(),
        },
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_value(item, results))
                .collect(),
        ),
        other => other.clone(),
    }
}
