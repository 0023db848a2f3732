//! Executing `HttpRequest` descriptors against the network.
//!
//! # Design
//! `Transport` is the I/O seam: resource clients and the recovery layer only
//! ever see descriptors and plain-data responses. `UreqTransport` is the
//! production implementation. Its agent keeps a cookie jar, so the session
//! cookies the server sets on login and refresh are sent back on every later
//! request, the way a browser treats same-origin calls.
//!
//! Non-2xx statuses are returned as data rather than `Err`; only failures
//! that produced no response at all surface as `ApiError::Transport`.

use std::time::Duration;

use log::debug;
use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, Body, RequestBuilder};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes one request and returns the server's response, whatever its status.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a cookie-keeping `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!("{} {}", request.method.as_str(), request.path);

        let path = request.path.as_str();
        let mut response = match request.method {
            HttpMethod::Get => send_without_body(self.agent.get(path), request),
            HttpMethod::Delete => send_without_body(self.agent.delete(path), request),
            HttpMethod::Post => send_with_body(self.agent.post(path), request),
            HttpMethod::Patch => send_with_body(self.agent.patch(path), request),
        }?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string()?;

        debug!("{} {} -> {}", request.method.as_str(), request.path, status.as_u16());

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

fn apply_headers<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_without_body(
    builder: RequestBuilder<WithoutBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<Body>, ureq::Error> {
    let builder = apply_headers(builder, request);
    match &request.body {
        // DELETE endpoints take their identifiers as a JSON body.
        Some(body) => builder.force_send_body().send(body.as_bytes()),
        None => builder.call(),
    }
}

fn send_with_body(
    builder: RequestBuilder<WithBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<Body>, ureq::Error> {
    let builder = apply_headers(builder, request);
    match &request.body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
