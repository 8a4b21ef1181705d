//! Client core for the task manager service.
//!
//! # Overview
//! Keeps an in-memory task collection consistent with a remote REST store
//! across create, update and delete. Requests are built and responses parsed
//! as plain data (host-does-IO); the host plugs in a [`Transport`] to run them.
//!
//! # Design
//! - `TaskClient` is stateless and performs no I/O.
//! - `TaskApi` composes build → execute → parse for each operation.
//! - `TaskForm` and `TaskList` are views that emit [`TaskAction`]s; only
//!   `TaskController` mutates the collection, after the server confirms.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod action;
pub mod api;
pub mod client;
pub mod controller;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod types;

pub use action::TaskAction;
pub use api::TaskApi;
pub use client::TaskClient;
pub use controller::{AppView, Completion, TaskController};
pub use error::{ApiError, TransportError};
pub use form::{FormField, TaskForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use list::{TaskCard, TaskList, TaskListView};
pub use types::{CreateTaskRequest, Task, TaskId, TaskPriority, TaskStatus, UpdateTaskRequest};
