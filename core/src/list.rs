//! Read-only view model for the task list.
//!
//! `TaskList` borrows the controller's collection and turns selector changes
//! and delete clicks into [`TaskAction`]s. It never removes or edits rows on
//! its own; the next render reflects whatever the controller decided.

use chrono::DateTime;

use crate::action::TaskAction;
use crate::types::{Task, TaskId, TaskPriority, TaskStatus, UpdateTaskRequest};

pub const EMPTY_MESSAGE: &str = "No tasks yet. Create your first task above!";

pub fn priority_class(priority: TaskPriority) -> String {
    format!("priority-{priority}")
}

pub fn status_class(status: TaskStatus) -> String {
    format!("status-{status}")
}

/// Calendar date of an RFC 3339 timestamp, or the raw string if it does not
/// parse.
pub fn display_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Everything a renderer needs for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: TaskId,
    pub class: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub status_class: String,
    pub priority: TaskPriority,
    pub priority_class: String,
    pub delete_label: String,
    pub created: String,
    /// Present only when the record was modified after creation.
    pub updated: Option<String>,
}

impl TaskCard {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            class: format!("task-card {}", priority_class(task.priority)),
            title: task.title.clone(),
            description: (!task.description.is_empty()).then(|| task.description.clone()),
            status: task.status,
            status_class: format!("status-select {}", status_class(task.status)),
            priority: task.priority,
            priority_class: format!("priority-select {}", priority_class(task.priority)),
            delete_label: format!("Delete task: {}", task.title),
            created: display_date(&task.created_at),
            updated: (task.updated_at != task.created_at).then(|| display_date(&task.updated_at)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListView {
    Empty { header: String, message: String },
    Cards { header: String, cards: Vec<TaskCard> },
}

impl TaskListView {
    pub fn header(&self) -> &str {
        match self {
            TaskListView::Empty { header, .. } | TaskListView::Cards { header, .. } => header.as_str(),
        }
    }

    pub fn cards(&self) -> &[TaskCard] {
        match self {
            TaskListView::Empty { .. } => &[],
            TaskListView::Cards { cards, .. } => cards.as_slice(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TaskList<'a> {
    tasks: &'a [Task],
}

impl<'a> TaskList<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        Self { tasks }
    }

    pub fn view(&self) -> TaskListView {
        if self.tasks.is_empty() {
            return TaskListView::Empty {
                header: "Tasks".to_string(),
                message: EMPTY_MESSAGE.to_string(),
            };
        }
        TaskListView::Cards {
            header: format!("Tasks ({})", self.tasks.len()),
            cards: self.tasks.iter().map(TaskCard::from_task).collect(),
        }
    }

    pub fn status_changed(&self, id: TaskId, status: TaskStatus) -> TaskAction {
        TaskAction::Update {
            id,
            patch: UpdateTaskRequest::status(status),
        }
    }

    pub fn priority_changed(&self, id: TaskId, priority: TaskPriority) -> TaskAction {
        TaskAction::Update {
            id,
            patch: UpdateTaskRequest::priority(priority),
        }
    }

    pub fn delete_clicked(&self, id: TaskId) -> TaskAction {
        TaskAction::Delete { id }
    }

    pub fn render_text(&self) -> String {
        match self.view() {
            TaskListView::Empty { header, message } => format!("{header}\n  {message}\n"),
            TaskListView::Cards { header, cards } => {
                let mut out = format!("{header}\n");
                for card in &cards {
                    out.push_str(&format!("  #{} {} [{}]\n", card.id, card.title, card.priority));
                    if let Some(description) = &card.description {
                        out.push_str(&format!("      {description}\n"));
                    }
                    out.push_str(&format!(
                        "      Status: {}  Priority: {}\n",
                        card.status.label(),
                        card.priority.label()
                    ));
                    out.push_str(&format!("      Created: {}", card.created));
                    if let Some(updated) = &card.updated {
                        out.push_str(&format!("  Updated: {updated}"));
                    }
                    out.push('\n');
                }
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: TaskId, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            created_at: "2024-03-10T08:00:00Z".to_string(),
            updated_at: "2024-03-10T08:00:00Z".to_string(),
        }
    }

    #[test]
    fn empty_collection_shows_message_and_no_cards() {
        let view = TaskList::new(&[]).view();
        assert_eq!(view.cards().len(), 0);
        assert_eq!(view.header(), "Tasks");
        assert!(matches!(view, TaskListView::Empty { ref message, .. } if message == EMPTY_MESSAGE));
    }

    #[test]
    fn header_carries_count() {
        let tasks = vec![task(1, "a"), task(2, "b")];
        let view = TaskList::new(&tasks).view();
        assert!(view.header().contains("(2)"));
        assert_eq!(view.cards().len(), 2);
    }

    #[test]
    fn status_change_emits_status_only_patch() {
        let tasks = vec![task(1, "a")];
        let action = TaskList::new(&tasks).status_changed(1, TaskStatus::Done);
        let TaskAction::Update { id, patch } = action else {
            panic!("expected update action");
        };
        assert_eq!(id, 1);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"status": "done"})
        );
    }

    #[test]
    fn priority_change_emits_priority_only_patch() {
        let tasks = vec![task(1, "a")];
        let action = TaskList::new(&tasks).priority_changed(1, TaskPriority::Low);
        assert_eq!(
            action,
            TaskAction::Update {
                id: 1,
                patch: UpdateTaskRequest {
                    priority: Some(TaskPriority::Low),
                    ..Default::default()
                },
            }
        );
    }

    #[test]
    fn delete_emits_id_without_touching_rows() {
        let tasks = vec![task(1, "a"), task(2, "b")];
        let list = TaskList::new(&tasks);
        assert_eq!(list.delete_clicked(1), TaskAction::Delete { id: 1 });
        assert_eq!(list.view().cards().len(), 2);
    }

    #[test]
    fn classes_follow_current_values() {
        let mut t = task(3, "c");
        t.priority = TaskPriority::Critical;
        t.status = TaskStatus::Doing;
        let tasks = vec![t];
        let view = TaskList::new(&tasks).view();
        let card = &view.cards()[0];
        assert_eq!(card.class, "task-card priority-critical");
        assert_eq!(card.status_class, "status-select status-doing");
        assert_eq!(card.priority_class, "priority-select priority-critical");
    }

    #[test]
    fn description_and_updated_date_are_optional() {
        let mut edited = task(1, "a");
        edited.description = "notes".to_string();
        edited.updated_at = "2024-03-12T09:00:00Z".to_string();
        let tasks = vec![edited, task(2, "b")];
        let view = TaskList::new(&tasks).view();
        let cards = view.cards();
        assert_eq!(cards[0].description.as_deref(), Some("notes"));
        assert_eq!(cards[0].created, "2024-03-10");
        assert_eq!(cards[0].updated.as_deref(), Some("2024-03-12"));
        assert_eq!(cards[1].description, None);
        assert_eq!(cards[1].updated, None);
    }

    #[test]
    fn unparseable_timestamp_is_shown_raw() {
        assert_eq!(display_date("yesterday"), "yesterday");
    }

    #[test]
    fn text_rendering_lists_each_task() {
        let tasks = vec![task(1, "Alpha"), task(2, "Beta")];
        let text = TaskList::new(&tasks).render_text();
        assert!(text.starts_with("Tasks (2)"));
        assert!(text.contains("#1 Alpha"));
        assert!(text.contains("#2 Beta"));
        assert!(!text.contains("Updated:"));
    }
}
