//! Task data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::TaskError;

/// Positive integer task ID, stored as a plain JSON number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u32);

impl TaskId {
    pub const FIRST: TaskId = TaskId(1);

    pub fn new(n: u32) -> Self {
        Self(n)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The ID following this one, or `None` once the ID space is used up
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u32>() {
            Ok(0) | Err(_) => Err(TaskError::Validation(format!(
                "task ID must be a positive integer, got '{}'",
                s
            ))),
            Ok(n) => Ok(Self(n)),
        }
    }
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Todo,
    /// Being worked on
    InProgress,
    /// Completed
    Done,
}

impl TaskStatus {
    /// Parse status from its stored label
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "todo" => Some(Self::Todo),
            "in-progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Get the text label, as written to the task file
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which tasks a listing should include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    /// Every task
    #[default]
    Total,
    /// Only tasks with this status
    Status(TaskStatus),
}

impl ListFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            ListFilter::Total => true,
            ListFilter::Status(status) => task.status == *status,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListFilter::Total => "total",
            ListFilter::Status(status) => status.label(),
        }
    }
}

impl FromStr for ListFilter {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "total" {
            return Ok(ListFilter::Total);
        }
        TaskStatus::parse(s).map(ListFilter::Status).ok_or_else(|| {
            TaskError::Validation(format!(
                "invalid filter '{}', expected one of: total, todo, in-progress, done",
                s
            ))
        })
    }
}

impl fmt::Display for ListFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: TaskId,

    /// What needs doing
    pub description: String,

    /// Current status
    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last changed
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new `todo` task stamped with the current time
    pub fn new(id: TaskId, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            description: description.into(),
            status: TaskStatus::Todo,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_parse() {
        assert_eq!("42".parse::<TaskId>().unwrap(), TaskId::new(42));
        assert_eq!(" 3 ".parse::<TaskId>().unwrap(), TaskId::new(3));
        assert!("0".parse::<TaskId>().is_err());
        assert!("-1".parse::<TaskId>().is_err());
        assert!("abc".parse::<TaskId>().is_err());
        assert!("".parse::<TaskId>().is_err());
    }

    #[test]
    fn test_task_id_next() {
        assert_eq!(TaskId::FIRST.next(), Some(TaskId::new(2)));
        assert_eq!(TaskId::new(u32::MAX).next(), None);
    }

    #[test]
    fn test_task_status() {
        assert_eq!(TaskStatus::parse("todo"), Some(TaskStatus::Todo));
        assert_eq!(TaskStatus::parse("in-progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("done"), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::parse("in_progress"), None);
        assert_eq!(TaskStatus::InProgress.to_string(), "in-progress");
    }

    #[test]
    fn test_list_filter_parse() {
        assert_eq!("total".parse::<ListFilter>().unwrap(), ListFilter::Total);
        assert_eq!(
            "done".parse::<ListFilter>().unwrap(),
            ListFilter::Status(TaskStatus::Done)
        );
        let err = "bogus".parse::<ListFilter>().unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_task_serializes_with_camel_case_fields() {
        let task = Task::new(TaskId::new(1), "buy milk");
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["description"], "buy milk");
        assert_eq!(value["status"], "todo");
        assert!(value["createdAt"].is_string());
        assert!(value["updatedAt"].is_string());
    }

    #[test]
    fn test_task_deserializes_in_progress_status() {
        let json = r#"{
            "id": 5,
            "description": "write report",
            "status": "in-progress",
            "createdAt": "2024-01-02T03:04:05Z",
            "updatedAt": "2024-01-03T03:04:05Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.id, TaskId::new(5));
        assert_eq!(task.status, TaskStatus::InProgress);
        assert!(task.updated_at > task.created_at);
    }
}
