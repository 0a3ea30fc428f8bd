/// Result type alias for galley operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for galley operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No runnable task remains while pending tasks are left
    #[error("circular dependency detected in task graph; blocked tasks: {}", pending.join(", "))]
    CircularDependency { pending: Vec<String> },

    /// Structural problems with a submitted plan
    #[error("invalid plan: {message}")]
    Plan { message: String },

    /// Engine configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a circular dependency error listing the blocked task ids
    #[must_use]
    pub fn circular_dependency(pending: Vec<String>) -> Self {
        Error::CircularDependency { pending }
    }

    /// Create a plan validation error
    #[must_use]
    pub fn plan(message: impl Into<String>) -> Self {
        Error::Plan {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_dependency_lists_blocked_tasks() {
        let err = Error::circular_dependency(vec!["task2".into(), "task5".into()]);
        let message = err.to_string();
        assert!(message.contains("circular dependency"));
        assert!(message.contains("task2, task5"));
    }

    #[test]
    fn json_error_preserves_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::from(source);
        assert!(std::error::Error::source(&err).is_some());
    }
}
