//! HTTP transport types and the client capability a contact is saved through.
//!
//! # Design
//! Requests and responses are plain data. `ContactRecord` builds an
//! `HttpRequest` and hands it to whatever `HttpClient` the caller injects,
//! so validation and state handling can be exercised without a network.
//! Any status code counts as a response; only failures to complete the
//! exchange surface as `TransportError`.

use thiserror::Error;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `ContactRecord::build_find_or_create`. Header names keep the
/// casing they were given (`apiKey`), although HTTP treats them
/// case-insensitively on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value whose name matches `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to complete an HTTP exchange.
///
/// `Clone` so a record can keep the most recent fault while also returning
/// it to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// DNS failure, refused connection, TLS or protocol error.
    #[error("connection error: {0}")]
    Connection(String),

    /// The exchange did not finish within the client's timeout.
    #[error("request timed out")]
    Timeout,

    /// The request URL could not be used.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The response arrived but its body could not be read as text.
    #[error("unreadable response body: {0}")]
    Body(String),
}

/// Capability to execute one HTTP exchange, blocking until it completes.
///
/// # Errors
///
/// Implementations return `TransportError` only when no response was
/// obtained. Non-2xx statuses are returned as `Ok(HttpResponse)`.
pub trait HttpClient {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}
