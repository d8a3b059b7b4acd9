// HTTP helpers for the completion client.

use std::time::{Duration, SystemTime};

use reqwest::header::HeaderMap;
use serde_json::Value;

/// Parse `Retry-After` as numeric seconds or an HTTP-date (RFC 7231).
/// Missing, malformed, negative, non-finite and past values yield `None`.
pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get("retry-after")?.to_str().ok()?.trim();

    if let Ok(secs) = value.parse::<f64>() {
        // Negative, NaN, infinite and out-of-range values are all rejected here.
        return Duration::try_from_secs_f64(secs).ok();
    }

    let date = httpdate::parse_http_date(value).ok()?;
    date.duration_since(SystemTime::now()).ok()
}

/// Pull the human-readable message and the machine code out of an error body.
///
/// Falls back to the serialized body when the message path is absent, so a
/// diagnostic always has something to show.
pub(crate) fn error_message_and_code(
    body: &Value,
    message_path: &[&str],
    code_path: &[&str],
) -> (String, Option<String>) {
    let lookup = |path: &[&str]| {
        path.iter()
            .try_fold(body, |node, key| node.get(*key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let message = lookup(message_path).unwrap_or_else(|| body.to_string());
    (message, lookup(code_path))
}
