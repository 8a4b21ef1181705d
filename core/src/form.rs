//! Draft state for the "Add New Task" form.
//!
//! The only client-side validation is the blank-title check in
//! [`TaskForm::submit`], and it fails silently.

use crate::action::TaskAction;
use crate::types::{CreateTaskRequest, TaskPriority};

/// A single-field edit, one per keystroke or selector change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Title(String),
    Description(String),
    Priority(TaskPriority),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    draft: CreateTaskRequest,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &CreateTaskRequest {
        &self.draft
    }

    /// Replaces exactly one draft field.
    pub fn edit(&mut self, field: FormField) {
        match field {
            FormField::Title(title) => self.draft.title = title,
            FormField::Description(description) => self.draft.description = description,
            FormField::Priority(priority) => self.draft.priority = priority,
        }
    }

    /// Emits a create action for the current draft and resets the form.
    ///
    /// Returns `None` without touching the draft when the title is blank.
    /// The reset happens whether or not the resulting request later succeeds.
    pub fn submit(&mut self) -> Option<TaskAction> {
        if self.draft.title.trim().is_empty() {
            tracing::trace!("blank title, submit suppressed");
            return None;
        }
        let draft = std::mem::take(&mut self.draft);
        Some(TaskAction::Create(draft))
    }

    /// Plain-text rendering of the form.
    pub fn render_text(&self) -> String {
        let options: Vec<String> = TaskPriority::ALL
            .iter()
            .map(|p| {
                if *p == self.draft.priority {
                    format!("[{}]", p.label())
                } else {
                    p.label().to_string()
                }
            })
            .collect();
        format!(
            "Add New Task\n  Title *     : {}\n  Description : {}\n  Priority    : {}\n",
            self.draft.title,
            self.draft.description,
            options.join(" ")
        )
    }
}
