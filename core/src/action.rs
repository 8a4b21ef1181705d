//! User intents raised by the form and the list.
//!
//! Views never touch the task collection; they hand one of these to
//! `TaskController::dispatch`, which owns every mutation.

use crate::types::{CreateTaskRequest, TaskId, UpdateTaskRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    Create(CreateTaskRequest),
    Update { id: TaskId, patch: UpdateTaskRequest },
    Delete { id: TaskId },
}

impl TaskAction {
    /// Name used in log fields.
    pub fn operation(&self) -> &'static str {
        match self {
            TaskAction::Create(_) => "create",
            TaskAction::Update { .. } => "update",
            TaskAction::Delete { .. } => "delete",
        }
    }
}
