//! Error normalization and one-shot session recovery.
//!
//! # Design
//! Every resource call that comes back non-2xx lands here, together with the
//! descriptor of the request that failed. Two things can happen:
//!
//! - A 401 with a replayable request triggers one session refresh. If the
//!   refresh succeeds the request is replayed exactly once and its outcome is
//!   returned as is. The replay never re-enters recovery, so a request is
//!   never retried twice.
//! - Everything else, including a failed refresh, is turned into a single
//!   `ApiError::Server` carrying the normalized message of the *original*
//!   response. A failed refresh also sends the navigator back to the landing
//!   route unless it is already there.
//!
//! The server reports errors in one of four JSON shapes (`message`, `error`,
//! an `errors` field map, or `title`); `error_message` collapses all of them,
//! and non-JSON bodies, into one string.

use log::{info, warn};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::navigation::AppRoute;

const UNAUTHORIZED: u16 = 401;

/// Recover from a failed response, or explain it.
///
/// Returns the successful response of the replayed request when the session
/// could be refreshed, otherwise the normalized error.
pub fn recover(
    client: &ApiClient,
    response: HttpResponse,
    retry: Option<&HttpRequest>,
) -> Result<HttpResponse, ApiError> {
    if response.status == UNAUTHORIZED {
        if let Some(retry) = retry {
            match client.auth().refresh_token() {
                Ok(_) => {
                    info!("session refreshed, replaying {} {}", retry.method.as_str(), retry.path);
                    let replayed = client.execute(retry)?;
                    if replayed.is_success() {
                        return Ok(replayed);
                    }
                    return Err(parse_error(&replayed));
                }
                Err(err) => {
                    warn!("session refresh failed: {err}");
                    let root = AppRoute::Root.path();
                    let navigator = client.navigator();
                    if navigator.current_path() != root {
                        warn!("redirecting to {root} after failed session refresh");
                        navigator.navigate(&root);
                    }
                }
            }
        }
    }

    Err(parse_error(&response))
}

/// Turn a failed response into an `ApiError::Server`.
pub fn parse_error(response: &HttpResponse) -> ApiError {
    ApiError::Server {
        status: response.status,
        message: error_message(response),
    }
}

/// The single human-readable message describing a failed response.
///
/// Objects are matched against the known shapes in order: `message`,
/// `error`, `errors`, `title`. Any other object or array is reported as its
/// compact JSON text. Bodies that are not JSON, and JSON scalars, fall back
/// to the status text.
pub fn error_message(response: &HttpResponse) -> String {
    let json: Value = match serde_json::from_str(&response.body) {
        Ok(json) => json,
        Err(_) => return response.status_text.clone(),
    };

    match &json {
        Value::Object(object) => {
            if let Some(message) = object.get("message") {
                return text(message);
            }
            if let Some(error) = object.get("error") {
                return text(error);
            }
            if let Some(errors) = object.get("errors") {
                return field_errors(errors).unwrap_or_else(|| response.status_text.clone());
            }
            if let Some(title) = object.get("title") {
                return text(title);
            }
            json.to_string()
        }
        Value::Array(_) => json.to_string(),
        _ => response.status_text.clone(),
    }
}

/// Render `{"field": ["m1", "m2"]}` as `field: m1, m2` lines.
///
/// Arrays are read as index-keyed maps and scalars as empty maps, so `[]`
/// renders as an empty message. `None` means some field carried something
/// other than a list of messages.
fn field_errors(errors: &Value) -> Option<String> {
    let entries: Vec<(String, &Value)> = match errors {
        Value::Object(fields) => fields.iter().map(|(field, v)| (field.clone(), v)).collect(),
        Value::Array(items) => items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
        Value::String(s) if !s.is_empty() => return None,
        Value::Null => return None,
        _ => Vec::new(),
    };
    let mut lines = Vec::with_capacity(entries.len());
    for (field, messages) in entries {
        let messages = messages.as_array()?;
        lines.push(format!("{field}: {}", join(messages, ", ")));
    }
    Some(lines.join("\n"))
}

/// Join list items the way a browser stringifies them: `null` is blank and
/// nested lists are comma-joined.
fn join(items: &[Value], separator: &str) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Array(inner) => join(inner, ","),
            Value::Object(_) => "[object Object]".to_string(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
