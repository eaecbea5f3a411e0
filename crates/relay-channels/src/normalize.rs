//! Collapses backend responses into one result shape.
//!
//! Slack always answers with a JSON envelope carrying `ok`/`error`; Discord
//! webhooks signal failure with the HTTP status. Both paths end up as a
//! [`RelayResult`] inside the adapters and as a [`MessageResult`] at the
//! router boundary.

use relay_core::{MessageResult, Operation, Payload, Platform, RelayError, RelayResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Turn an adapter outcome into the externally visible result.
pub fn normalize(platform: Platform, outcome: RelayResult<Payload>) -> MessageResult {
    match outcome {
        Ok(payload) => MessageResult::Success { platform, payload },
        Err(err) => err.into(),
    }
}

/// Check a Slack Web API envelope and decode the success body.
///
/// `ok: false` yields the literal `error` code; a non-JSON body on a non-2xx
/// status yields `http_<status>`.
pub fn slack_envelope<T: DeserializeOwned>(status: u16, body: &str) -> RelayResult<T> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !is_success(status) => return Err(http_error(status, body)),
        Err(e) => return Err(e.into()),
    };

    if value.get("ok").and_then(Value::as_bool) == Some(true) {
        return Ok(serde_json::from_value(value)?);
    }

    match value.get("error").and_then(Value::as_str) {
        Some(code) => Err(RelayError::backend(code, code, Some(status))),
        None if !is_success(status) => Err(http_error(status, body)),
        None => Err(RelayError::backend(
            "unknown_error",
            "Slack returned ok=false without an error code",
            Some(status),
        )),
    }
}

/// Check a Discord webhook response.
///
/// Returns `None` for bodiless successes (`204 No Content`). Failures carry
/// the body's `message` field when present, otherwise the raw body.
pub fn discord_response(status: u16, body: &str) -> RelayResult<Option<Value>> {
    if !is_success(status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));
        return Err(match message {
            Some(message) => {
                RelayError::backend(format!("http_{status}"), message, Some(status))
            }
            None => http_error(status, body),
        });
    }
    if status == 204 || body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(body)?))
}

/// Map a transport failure onto `timeout` / `network_error`.
pub fn transport_error(err: &reqwest::Error) -> RelayError {
    if err.is_timeout() {
        RelayError::timeout(format!("Request timed out: {err}"))
    } else {
        RelayError::network(format!("Network error: {err}"))
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn http_error(status: u16, body: &str) -> RelayError {
    let body = body.trim();
    let message = if body.is_empty() {
        format!("HTTP {status}")
    } else {
        body.to_string()
    };
    RelayError::backend(format!("http_{status}"), message, Some(status))
}

/// Render a result as the JSON object returned to the calling agent.
///
/// Successes carry `success: true`, the platform, and the payload fields;
/// failures carry `success: false` with `error`, `code`, and `kind`.
/// Validation results use `valid` in place of `success`.
pub fn render(operation: Operation, result: &MessageResult) -> Value {
    let flag = if operation == Operation::Validate {
        "valid"
    } else {
        "success"
    };
    let mut out = Map::new();

    match result {
        MessageResult::Success { platform, payload } => {
            out.insert(flag.into(), Value::Bool(true));
            out.insert("platform".into(), Value::from(platform.as_str()));
            if let Ok(Value::Object(fields)) = serde_json::to_value(payload) {
                out.extend(fields);
            }
            let count = match payload {
                Payload::Messages(list) => Some(list.messages.len()),
                Payload::Channels(list) => Some(list.channels.len()),
                _ => None,
            };
            if let Some(count) = count {
                out.insert("count".into(), Value::from(count));
            }
        }
        MessageResult::Failure(failure) => {
            out.insert(flag.into(), Value::Bool(false));
            out.insert("error".into(), Value::from(failure.message.as_str()));
            out.insert("code".into(), Value::from(failure.code.as_str()));
            out.insert("kind".into(), Value::from(failure.kind.as_str()));
            if let Some(status) = failure.status {
                out.insert("status".into(), Value::from(status));
            }
            if let Some(help) = &failure.help {
                out.insert("help".into(), Value::from(help.as_str()));
            }
        }
    }

    Value::Object(out)
}
