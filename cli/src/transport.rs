//! Blocking HTTP transport backed by ureq.

use task_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

/// Executes core requests with a shared ureq agent.
///
/// Status-code-as-error is disabled so 4xx/5xx responses come back as data
/// and the core client decides what they mean. Timeouts are ureq's defaults.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = &self.agent;
        let content_type = req
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map_or("application/json", |(_, value)| value.as_str());

        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => agent
                .post(&req.path)
                .content_type(content_type)
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
            (HttpMethod::Patch, Some(body)) => agent
                .patch(&req.path)
                .content_type(content_type)
                .send(body.as_bytes()),
            (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}
