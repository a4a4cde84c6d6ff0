use std::path::PathBuf;

use thiserror::Error;

use super::model::TaskId;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Task not found (ID: {0})")]
    NotFound(TaskId),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed task file {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed task file {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}

/// Coarse classification of a [`TaskError`], for callers that only care
/// about which kind of failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Io,
    Format,
}

impl TaskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TaskError::Validation(_) => ErrorKind::Validation,
            TaskError::NotFound(_) => ErrorKind::NotFound,
            TaskError::Io { .. } => ErrorKind::Io,
            TaskError::Format { .. } | TaskError::Corrupt { .. } => ErrorKind::Format,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TaskError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        TaskError::Format {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TaskError::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_includes_id() {
        let err = TaskError::NotFound(TaskId::new(7));
        assert_eq!(err.to_string(), "Task not found (ID: 7)");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_io_message_includes_path() {
        let err = TaskError::io(
            "/tmp/tasks.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/tasks.json"));
        assert!(msg.contains("denied"));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_corrupt_is_a_format_failure() {
        let err = TaskError::corrupt("/tmp/tasks.json", "duplicate task ID 3");
        assert_eq!(
            err.to_string(),
            "Malformed task file /tmp/tasks.json: duplicate task ID 3"
        );
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
