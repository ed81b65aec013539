//! Executes the core's plain-data requests over HTTP.

use std::time::Duration;

use todo_core::{HttpMethod, HttpRequest, HttpResponse};
use tracing::{debug, trace};

/// Blocking HTTP executor. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        // Non-2xx statuses come back as data; the core decides what they mean.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ureq::Error> {
        debug!(method = %req.method, path = %req.path, "sending request");
        let agent = &self.agent;
        let mut response = match (req.method, req.body) {
            (HttpMethod::Get, _) => agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => agent.post(&req.path).content_type("application/json").send(body.as_bytes()),
            (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => agent.put(&req.path).content_type("application/json").send(body.as_bytes()),
            (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
        }?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;
        trace!(status, bytes = body.len(), "response received");
        Ok(HttpResponse::new(status, body))
    }
}
