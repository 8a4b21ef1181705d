//! The application controller: sole owner of the local task collection.
//!
//! # Design
//! Every operation is a request followed by a [`Completion`]. `dispatch`
//! performs both halves over the configured transport, but `apply` is public
//! so a host that runs requests itself can feed completions back in any
//! order. Completions are applied through `&mut self`, one at a time, so
//! reconciliation steps never interleave.
//!
//! Nothing is applied optimistically: the collection changes only after the
//! server confirmed the operation, and a failure leaves it untouched. Each
//! failure replaces the error banner; only a new load clears it.

use crate::action::TaskAction;
use crate::api::TaskApi;
use crate::error::ApiError;
use crate::form::{FormField, TaskForm};
use crate::http::Transport;
use crate::list::TaskList;
use crate::types::{Task, TaskId};

pub const LOAD_FAILED: &str = "Failed to load tasks";
pub const CREATE_FAILED: &str = "Failed to create task";
pub const UPDATE_FAILED: &str = "Failed to update task";
pub const DELETE_FAILED: &str = "Failed to delete task";

/// The outcome of one API call, ready to be reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Loaded(Result<Vec<Task>, ApiError>),
    Created(Result<Task, ApiError>),
    Updated { id: TaskId, result: Result<Task, ApiError> },
    Deleted { id: TaskId, result: Result<(), ApiError> },
}

/// What the screen shows right now.
#[derive(Debug, Clone, Copy)]
pub enum AppView<'a> {
    /// Only a loading indicator; form and list are hidden.
    Loading,
    Ready {
        error: Option<&'a str>,
        form: &'a TaskForm,
        list: TaskList<'a>,
    },
}

impl AppView<'_> {
    pub fn render_text(&self) -> String {
        match self {
            AppView::Loading => "Loading tasks...\n".to_string(),
            AppView::Ready { error, form, list } => {
                let mut out = String::from("Task Manager\n");
                if let Some(error) = error {
                    out.push_str(&format!("! {error}\n"));
                }
                out.push('\n');
                out.push_str(&form.render_text());
                out.push('\n');
                out.push_str(&list.render_text());
                out
            }
        }
    }
}

pub struct TaskController<T> {
    api: TaskApi<T>,
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
    mounted: bool,
    form: TaskForm,
}

impl<T: Transport> TaskController<T> {
    /// A fresh controller shows the loading indicator until its first load
    /// completes.
    pub fn new(api: TaskApi<T>) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            loading: true,
            error: None,
            mounted: false,
            form: TaskForm::new(),
        }
    }

    pub fn api(&self) -> &TaskApi<T> {
        &self.api
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn view(&self) -> AppView<'_> {
        if self.loading {
            return AppView::Loading;
        }
        AppView::Ready {
            error: self.error(),
            form: &self.form,
            list: TaskList::new(&self.tasks),
        }
    }

    /// Loads the collection the first time it is called; later calls are
    /// no-ops.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.load();
    }

    /// Replaces the collection with the server's list.
    pub fn load(&mut self) {
        self.begin_load();
        let result = self.api.get_all_tasks();
        self.apply(Completion::Loaded(result));
    }

    /// Enters the loading state and clears the banner. Pair with
    /// `apply(Completion::Loaded(..))`.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn edit_form(&mut self, field: FormField) {
        if self.loading {
            return;
        }
        self.form.edit(field);
    }

    /// Submits the form; a blank title does nothing.
    pub fn submit_form(&mut self) {
        if self.loading {
            return;
        }
        if let Some(action) = self.form.submit() {
            self.dispatch(action);
        }
    }

    /// Runs an action against the server and reconciles the result.
    /// Ignored while loading.
    pub fn dispatch(&mut self, action: TaskAction) {
        if self.loading {
            tracing::debug!(operation = action.operation(), "ignoring action while loading");
            return;
        }
        let completion = self.execute(&action);
        self.apply(completion);
    }

    /// Performs the API call for `action` without touching local state.
    pub fn execute(&self, action: &TaskAction) -> Completion {
        match action {
            TaskAction::Create(request) => Completion::Created(self.api.create_task(request)),
            TaskAction::Update { id, patch } => Completion::Updated {
                id: *id,
                result: self.api.update_task(*id, patch),
            },
            TaskAction::Delete { id } => Completion::Deleted {
                id: *id,
                result: self.api.delete_task(*id),
            },
        }
    }

    /// Fetches one task for display; the collection is left alone.
    pub fn fetch_task(&self, id: TaskId) -> Result<Task, ApiError> {
        self.api.get_task(id)
    }

    /// Reconciles the local collection with a finished API call.
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Loaded(Ok(tasks)) => {
                tracing::debug!(count = tasks.len(), "tasks loaded");
                self.tasks = tasks;
                self.loading = false;
            }
            Completion::Loaded(Err(err)) => {
                self.fail("load", LOAD_FAILED, &err);
                self.loading = false;
            }
            Completion::Created(Ok(task)) => {
                tracing::debug!(id = task.id, "task created");
                self.tasks.push(task);
            }
            Completion::Created(Err(err)) => self.fail("create", CREATE_FAILED, &err),
            Completion::Updated { id, result: Ok(task) } => {
                match self.tasks.iter_mut().find(|t| t.id == id) {
                    Some(slot) => *slot = task,
                    None => tracing::debug!(id, "updated task is no longer in the collection"),
                }
            }
            Completion::Updated { id, result: Err(err) } => {
                tracing::debug!(id, "update rejected");
                self.fail("update", UPDATE_FAILED, &err);
            }
            Completion::Deleted { id, result: Ok(()) } => {
                self.tasks.retain(|t| t.id != id);
            }
            Completion::Deleted { id, result: Err(err) } => {
                tracing::debug!(id, "delete rejected");
                self.fail("delete", DELETE_FAILED, &err);
            }
        }
    }

    fn fail(&mut self, operation: &'static str, message: &'static str, err: &ApiError) {
        tracing::error!(operation, error = %err, "{message}");
        self.error = Some(message.to_string());
    }
}
