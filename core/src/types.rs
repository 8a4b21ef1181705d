//! Domain DTOs for the task API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//! Timestamps stay as the ISO-8601 strings the server produced; the client only
//! formats them for display and never recomputes them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned task identifier.
pub type TaskId = i64;

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        }
    }

    /// Human-readable option label.
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::Doing => "Doing",
            TaskStatus::Done => "Done",
        }
    }
}

/// Urgency of a task, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Critical => "critical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Critical => "Critical",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known status or priority.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "status",
                value: s.to_string(),
            })
    }
}

impl FromStr for TaskPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskPriority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "priority",
                value: s.to_string(),
            })
    }
}

/// A single task record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub created_at: String,
    pub updated_at: String,
}

/// Request payload for creating a new task. The server assigns the id,
/// the initial status and both timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: TaskPriority,
}

/// Partial patch for an existing task. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

impl UpdateTaskRequest {
    /// A patch touching only `status`.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// A patch touching only `priority`.
    pub fn priority(priority: TaskPriority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_deserializes_from_server_json() {
        let json = r#"{
            "id": 7,
            "title": "Write docs",
            "description": "",
            "status": "doing",
            "priority": "critical",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-02T09:30:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.status, TaskStatus::Doing);
        assert_eq!(task.priority, TaskPriority::Critical);
        assert!(task.description.is_empty());
    }

    #[test]
    fn create_request_defaults_to_medium() {
        let req = CreateTaskRequest::default();
        assert_eq!(req.priority, TaskPriority::Medium);
        assert!(req.title.is_empty());
        assert!(req.description.is_empty());
    }

    #[test]
    fn status_patch_serializes_single_field() {
        let json = serde_json::to_value(UpdateTaskRequest::status(TaskStatus::Done)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "done"}));
    }

    #[test]
    fn priority_patch_serializes_single_field() {
        let json = serde_json::to_value(UpdateTaskRequest::priority(TaskPriority::High)).unwrap();
        assert_eq!(json, serde_json::json!({"priority": "high"}));
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let patch = UpdateTaskRequest::default();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result: Result<Task, _> = serde_json::from_str(
            r#"{"id":1,"title":"x","description":"","status":"blocked","priority":"low","created_at":"a","updated_at":"a"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn enums_parse_from_wire_names() {
        assert_eq!("doing".parse::<TaskStatus>().unwrap(), TaskStatus::Doing);
        assert_eq!("critical".parse::<TaskPriority>().unwrap(), TaskPriority::Critical);
        let err = "urgent".parse::<TaskPriority>().unwrap_err();
        assert_eq!(err.to_string(), "unknown priority `urgent`");
    }

    #[test]
    fn priorities_order_low_to_critical() {
        let mut sorted = TaskPriority::ALL;
        sorted.sort();
        assert_eq!(sorted, TaskPriority::ALL);
        assert!(TaskPriority::Critical > TaskPriority::High);
    }
}
