//! Blocking `HttpClient` backed by ureq.
//!
//! # Design
//! ureq's status-as-error behavior is switched off so 4xx/5xx responses come
//! back as `HttpResponse` data. Only failures to obtain a response at all map
//! to `TransportError`.

use std::fmt;
use std::time::Duration;

use ureq::Agent;

use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, TransportError};

/// Production HTTP client.
#[derive(Clone)]
pub struct UreqClient {
    agent: Agent,
}

impl UreqClient {
    /// Client with ureq's default timeouts.
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    /// Client whose whole exchange must finish within `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wraps a preconfigured agent (proxy, TLS, custom timeouts).
    ///
    /// The agent should have `http_status_as_error(false)`; otherwise error
    /// statuses surface as `TransportError::Connection`.
    pub fn from_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UreqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqClient").finish_non_exhaustive()
    }
}

impl HttpClient for UreqClient {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.path);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.path);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(classify)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::BadUri(uri) => TransportError::InvalidUrl(uri),
        other => TransportError::Connection(other.to_string()),
    }
}
