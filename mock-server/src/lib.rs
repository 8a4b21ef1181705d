//! In-memory implementation of the `/v1/tasks` REST API.
//!
//! Used by the client's integration tests and for local development. Ids come
//! from a counter starting at 1; timestamps are RFC 3339 UTC strings.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    Doing,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

/// A failed request, rendered as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiFailure {
    #[error("task not found")]
    NotFound,
    #[error("{0}")]
    Invalid(&'static str),
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = match self {
            ApiFailure::NotFound => StatusCode::NOT_FOUND,
            ApiFailure::Invalid(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

fn validate_title(title: &str) -> Result<(), ApiFailure> {
    if title.trim().is_empty() {
        return Err(ApiFailure::Invalid("title is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ApiFailure::Invalid("title must be less than 200 characters"));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ApiFailure> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ApiFailure::Invalid("description must be less than 1000 characters"));
    }
    Ok(())
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    tasks: HashMap<i64, Task>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/v1/tasks", get(list_tasks).post(create_task))
        .route("/v1/tasks/{id}", get(get_task).patch(update_task).delete(delete_task))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Highest priority first, then oldest first.
async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    let store = db.read().await;
    let mut tasks: Vec<Task> = store.tasks.values().cloned().collect();
    tasks.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    Json(tasks)
}

async fn create_task(
    State(db): State<Db>,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), ApiFailure> {
    validate_title(&input.title)?;
    validate_description(&input.description)?;

    let mut store = db.write().await;
    store.next_id += 1;
    let stamp = now();
    let task = Task {
        id: store.next_id,
        title: input.title,
        description: input.description,
        status: Status::Todo,
        priority: input.priority,
        created_at: stamp.clone(),
        updated_at: stamp,
    };
    store.tasks.insert(task.id, task.clone());
    tracing::info!(id = task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Task>, ApiFailure> {
    let store = db.read().await;
    store.tasks.get(&id).cloned().map(Json).ok_or(ApiFailure::NotFound)
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>, ApiFailure> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(description) = &input.description {
        validate_description(description)?;
    }

    let mut store = db.write().await;
    let task = store.tasks.get_mut(&id).ok_or(ApiFailure::NotFound)?;
    if let Some(title) = input.title {
        task.title = title;
    }
    if let Some(description) = input.description {
        task.description = description;
    }
    if let Some(status) = input.status {
        task.status = status;
    }
    if let Some(priority) = input.priority {
        task.priority = priority;
    }
    // Fixed-width stamps compare lexically; never step behind created_at.
    task.updated_at = now().max(task.created_at.clone());
    tracing::info!(id, "task updated");
    Ok(Json(task.clone()))
}

async fn delete_task(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, ApiFailure> {
    let mut store = db.write().await;
    store.tasks.remove(&id).ok_or(ApiFailure::NotFound)?;
    tracing::info!(id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}
