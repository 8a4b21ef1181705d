//! Blocking task API over a host-provided [`Transport`].
//!
//! `TaskApi` glues `TaskClient`'s build/parse halves to a transport so callers
//! that own the network can use one call per operation. No retries, no
//! caching; every failure is returned to the caller as an [`ApiError`].

use crate::client::TaskClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{CreateTaskRequest, Task, TaskId, UpdateTaskRequest};

#[derive(Debug, Clone)]
pub struct TaskApi<T> {
    client: TaskClient,
    transport: T,
}

impl<T: Transport> TaskApi<T> {
    pub fn new(client: TaskClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get_all_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.send(self.client.build_list_tasks())?;
        self.client.parse_list_tasks(response)
    }

    pub fn get_task(&self, id: TaskId) -> Result<Task, ApiError> {
        let response = self.send(self.client.build_get_task(id))?;
        self.client.parse_get_task(response)
    }

    pub fn create_task(&self, input: &CreateTaskRequest) -> Result<Task, ApiError> {
        let response = self.send(self.client.build_create_task(input)?)?;
        self.client.parse_create_task(response)
    }

    pub fn update_task(&self, id: TaskId, input: &UpdateTaskRequest) -> Result<Task, ApiError> {
        let response = self.send(self.client.build_update_task(id, input)?)?;
        self.client.parse_update_task(response)
    }

    pub fn delete_task(&self, id: TaskId) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_task(id))?;
        self.client.parse_delete_task(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method.as_str();
        let path = request.path.clone();
        tracing::debug!(method, path = %path, "sending request");
        let response = self.transport.execute(request)?;
        tracing::debug!(method, path = %path, status = response.status, "received response");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::error::TransportError;
    use crate::http::HttpMethod;
    use crate::types::{TaskPriority, TaskStatus};

    /// Replays canned results and records what was sent.
    #[derive(Default)]
    struct Scripted {
        replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
        sent: RefCell<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn reply(self, status: u16, body: &str) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Ok(HttpResponse::new(status, body)));
            self
        }

        fn fail(self, message: &str) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Err(TransportError::new(message)));
            self
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.borrow_mut().push(request);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::new("no scripted reply")))
        }
    }

    fn api(transport: Scripted) -> TaskApi<Scripted> {
        TaskApi::new(TaskClient::new("http://api.test"), transport)
    }

    const TASK: &str = r#"{"id":4,"title":"Ship","description":"","status":"done","priority":"high","created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-02T00:00:00Z"}"#;

    #[test]
    fn update_task_patches_and_returns_server_record() {
        let api = api(Scripted::default().reply(200, TASK));
        let task = api
            .update_task(4, &UpdateTaskRequest::status(TaskStatus::Done))
            .unwrap();
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.priority, TaskPriority::High);

        let sent = api.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Patch);
        assert_eq!(sent[0].path, "http://api.test/v1/tasks/4");
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"status":"done"}"#));
    }

    #[test]
    fn transport_failure_is_propagated() {
        let api = api(Scripted::default().fail("connection refused"));
        let err = api.get_all_tasks().unwrap_err();
        assert_eq!(
            err,
            ApiError::Transport(TransportError::new("connection refused"))
        );
    }

    #[test]
    fn get_task_reports_not_found() {
        let api = api(Scripted::default().reply(404, r#"{"error":"task not found"}"#));
        assert_eq!(api.get_task(99).unwrap_err(), ApiError::NotFound);
    }

    #[test]
    fn failures_are_not_retried() {
        let api = api(Scripted::default().reply(503, "").reply(204, ""));
        assert!(api.delete_task(1).is_err());
        assert_eq!(api.transport().sent.borrow().len(), 1);
    }
}
