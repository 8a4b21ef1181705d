//! Stateless HTTP request builder and response parser for the task API.
//!
//! # Design
//! `TaskClient` holds only the resource URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping the
//! core deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTaskRequest, Task, TaskId, UpdateTaskRequest};

/// Versioned path of the task resource, relative to the service origin.
pub const TASKS_PATH: &str = "/v1/tasks";

/// Synchronous, stateless client for the task API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    tasks_url: String,
}

impl TaskClient {
    /// `base_url` is the service origin (e.g. `http://localhost:8080`); the
    /// versioned `/v1/tasks` path is appended here.
    pub fn new(base_url: &str) -> Self {
        Self {
            tasks_url: format!("{}{TASKS_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn tasks_url(&self) -> &str {
        &self.tasks_url
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.tasks_url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_task(&self, id: TaskId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.task_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_task(&self, input: &CreateTaskRequest) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.tasks_url.clone(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_task(&self, id: TaskId, input: &UpdateTaskRequest) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            path: self.task_url(id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_task(&self, id: TaskId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.task_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        parse_json(response)
    }

    /// The body of a successful delete is ignored.
    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/{id}", self.tasks_url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
