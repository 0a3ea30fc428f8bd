//! Parser for the closed reference-expression grammar.
//!
//! A reference expression is a string parameter value that encodes a read
//! from a prior task's stored result. The forms, tried most specific
//! first:
//!
//! 1. `session.<path>`: session-context marker, resolved by a later
//!    stage, never here.
//! 2. `A + B`: concatenation of nested paths into one flattened list.
//! 3. `a.result.<slot>, b.result.<slot>`: comma-separated dish-slot
//!    field references collected into a list.
//! 4. `<task>.result.<slot>`: single dish-slot field shortcut.
//! 5. `<task>.result.<k1>.<k2>...`: arbitrary nested path walk.
//! 6. `<task>.result`: whole-result shortcut with name-list projection.
//!
//! Anything else is a literal and parses to `None`.

/// Fixed field vocabulary for the dish-slot shortcut.
pub(crate) const DISH_SLOTS: [&str; 3] = ["main_dish", "side_dish", "soup"];

const SESSION_PREFIX: &str = "session.";
const RESULT_SUFFIX: &str = ".result";
const RESULT_SEGMENT: &str = ".result.";
const CONCAT_SEPARATOR: &str = " + ";

/// A dotted walk through a task's stored payload, e.g.
/// `task2.result.data.candidates`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    pub task: String,
    /// Key segments after the task id, `["result", "data", "candidates"]`
    pub segments: Vec<String>,
}

impl PathExpr {
    fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split('.');
        let task = parts.next()?;
        let segments: Vec<String> = parts.map(str::to_string).collect();
        if task.is_empty() || segments.is_empty() || segments.iter().any(String::is_empty) {
            return None;
        }
        Some(Self {
            task: task.to_string(),
            segments,
        })
    }
}

/// A dish-slot field shortcut, exactly `<task>.result.<slot>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldExpr {
    pub task: String,
    pub slot: String,
}

impl FieldExpr {
    fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.split('.').collect();
        match parts.as_slice() {
            [task, "result", slot] if !task.is_empty() && DISH_SLOTS.contains(slot) => {
                Some(Self {
                    task: (*task).to_string(),
                    slot: (*slot).to_string(),
                })
            }
            _ => None,
        }
    }
}

/// A parsed reference expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefExpr {
    /// `session.<path>`: left untouched for the session stage
    Session,
    /// `A + B`: flattened list concatenation of nested paths
    Concat(Vec<PathExpr>),
    /// Comma-separated dish-slot references, collected into a list
    MultiField(Vec<FieldExpr>),
    /// Single dish-slot field shortcut
    Field(FieldExpr),
    /// Arbitrary nested path walk
    Path(PathExpr),
    /// `<task>.result`: whole-result name-list projection
    WholeResult { task: String },
}

impl RefExpr {
    /// Parse one string value. `None` means the value is a literal and
    /// passes through resolution unchanged.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.starts_with(SESSION_PREFIX) {
            return Some(RefExpr::Session);
        }
        // Every remaining form names at least one `<task>.result` read.
        if !raw.contains(RESULT_SUFFIX) {
            return None;
        }
        if raw.contains(CONCAT_SEPARATOR) && raw.contains(RESULT_SEGMENT) {
            let parts = raw
                .split(CONCAT_SEPARATOR)
                .map(str::trim)
                .filter_map(PathExpr::parse)
                .collect();
            return Some(RefExpr::Concat(parts));
        }
        if raw.contains(',') && raw.contains(RESULT_SEGMENT) {
            let fields = raw
                .split(',')
                .map(str::trim)
                .filter_map(FieldExpr::parse)
                .collect();
            return Some(RefExpr::MultiField(fields));
        }
        if let Some(field) = FieldExpr::parse(raw) {
            return Some(RefExpr::Field(field));
        }
        if raw.contains(RESULT_SEGMENT) {
            return PathExpr::parse(raw).map(RefExpr::Path);
        }
        if let Some(task) = raw.strip_suffix(RESULT_SUFFIX) {
            if !task.is_empty() {
                return Some(RefExpr::WholeResult {
                    task: task.to_string(),
                });
            }
        }
        None
    }
}
