//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::navigation::MemoryNavigator;
use crate::transport::Transport;

pub const BASE_URL: &str = "http://localhost:3000";

/// Answers requests from a fixed script and records everything it was sent.
/// Once the script runs out every request fails with a transport error.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ApiError::Transport("connection refused".to_string()))
    }
}

pub fn response(status: u16, body: &str) -> HttpResponse {
    let status_text = match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "",
    };
    HttpResponse {
        status,
        status_text: status_text.to_string(),
        headers: Vec::new(),
        body: body.to_string(),
    }
}

/// A client at `/catalog` answering from `responses`.
pub fn client_with(
    responses: Vec<HttpResponse>,
) -> (ApiClient, Arc<ScriptedTransport>, Arc<MemoryNavigator>) {
    let transport = Arc::new(ScriptedTransport::new(responses));
    let navigator = Arc::new(MemoryNavigator::new("/catalog"));
    let client = ApiClient::new(BASE_URL, transport.clone(), navigator.clone()).unwrap();
    (client, transport, navigator)
}
