// Anthropic Messages API client.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use prompt_showcase_types::{
    BoxFuture, Completion, CompletionService, Error, Message, ServiceConfig, Usage,
};

/// Default Anthropic API base URL.
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Required Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Environment variable overriding the API endpoint.
pub const BASE_URL_ENV: &str = "ANTHROPIC_BASE_URL";

/// Completion service backed by the Anthropic Messages API.
pub struct AnthropicService {
    api_key: SecretString,
    base_url: String,
    model: String,
    max_tokens: u32,
    http_client: reqwest::Client,
}

impl AnthropicService {
    /// Create a client with the given key and request settings.
    pub fn new(api_key: SecretString, config: ServiceConfig) -> Result<Self, Error> {
        let connect = timeout_duration("connect", config.timeout.connect)?;
        let request = timeout_duration("request", config.timeout.request)?;
        let http_client = reqwest::Client::builder()
            .connect_timeout(connect)
            .timeout(request)
            .build()
            .map_err(|e| Error {
                source: Some(Box::new(e)),
                ..Error::configuration("Failed to build HTTP client")
            })?;
        let base_url = config
            .base_url
            .as_deref()
            .map(crate::util::normalize_base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            base_url,
            model: config.model,
            max_tokens: config.max_tokens,
            http_client,
        })
    }

    /// Create from `ANTHROPIC_API_KEY`, honouring `ANTHROPIC_BASE_URL` when
    /// the config does not already carry a base URL.
    pub fn from_env(mut config: ServiceConfig) -> Result<Self, Error> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::configuration(format!("{API_KEY_ENV} not set")))?;
        if config.base_url.is_none() {
            config.base_url = std::env::var(BASE_URL_ENV).ok();
        }
        Self::new(SecretString::from(api_key), config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_headers(&self) -> Result<reqwest::header::HeaderMap, Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            self.api_key.expose_secret().parse().map_err(|_| {
                Error::configuration("Invalid API key: contains non-ASCII or control characters")
            })?,
        );
        headers.insert(
            "anthropic-version",
            reqwest::header::HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        Ok(headers)
    }

    async fn do_complete(&self, conversation: &[Message]) -> Result<Completion, Error> {
        if conversation.is_empty() {
            return Err(Error::configuration("Conversation must not be empty"));
        }

        let url = format!("{}/v1/messages", self.base_url);
        let body = translate_request(&self.model, self.max_tokens, conversation);
        let headers = self.build_headers()?;

        tracing::debug!(
            model = %self.model,
            messages = conversation.len(),
            "sending completion request"
        );

        let http_response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(format!("Request timed out: {e}"), e)
                } else {
                    Error::network(format!("HTTP request failed: {e}"), e)
                }
            })?;

        let status = http_response.status().as_u16();
        let headers = http_response.headers().clone();

        if status >= 400 {
            let error_body: serde_json::Value = http_response.json().await.unwrap_or(
                serde_json::json!({"error": {"message": "Failed to parse error response"}}),
            );
            let err = parse_error(status, &headers, error_body);
            tracing::warn!(status, kind = ?err.kind, "completion request rejected");
            return Err(err);
        }

        let bytes = http_response
            .bytes()
            .await
            .map_err(|e| Error::network(format!("Failed to read response: {e}"), e))?;
        let response_body: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| Error {
            source: Some(Box::new(e)),
            ..Error::invalid_response("Response body is not valid JSON")
        })?;

        let completion = parse_response(response_body)?;
        tracing::debug!(
            id = %completion.id,
            input_tokens = completion.usage.input_tokens,
            output_tokens = completion.usage.output_tokens,
            total_tokens = completion.usage.total_tokens(),
            "completion received"
        );
        Ok(completion)
    }
}

impl CompletionService for AnthropicService {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn complete<'a>(
        &'a self,
        conversation: &'a [Message],
    ) -> BoxFuture<'a, Result<Completion, Error>> {
        Box::pin(self.do_complete(conversation))
    }
}

fn timeout_duration(which: &str, secs: f64) -> Result<Duration, Error> {
    let invalid = || {
        Error::configuration(format!(
            "{which} timeout must be a positive number of seconds, got {secs}"
        ))
    };
    if secs.is_nan() || secs <= 0.0 {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}

/// Build the Messages API request body.
pub(crate) fn translate_request(
    model: &str,
    max_tokens: u32,
    conversation: &[Message],
) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "max_tokens": max_tokens,
        "messages": conversation,
    })
}

/// Parse a Messages API response into a `Completion`.
///
/// All `text` content blocks are concatenated; other block types are
/// skipped. A reply without any text block is an `InvalidResponse`.
pub(crate) fn parse_response(raw: serde_json::Value) -> Result<Completion, Error> {
    let field = |name: &str| {
        raw.get(name)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    };

    let texts: Vec<&str> = raw
        .get("content")
        .and_then(|v| v.as_array())
        .map(|blocks| {
            blocks
                .iter()
                .filter(|b| b.get("type").and_then(|t| t.as_str()) == Some("text"))
                .filter_map(|b| b.get("text").and_then(|t| t.as_str()))
                .collect()
        })
        .unwrap_or_default();
    if texts.is_empty() {
        return Err(Error {
            raw: Some(raw.clone()),
            ..Error::invalid_response("Response contained no text content")
        });
    }

    let usage_field = |name: &str| {
        raw.get("usage")
            .and_then(|u| u.get(name))
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32
    };

    Ok(Completion {
        id: field("id"),
        model: field("model"),
        text: texts.concat(),
        stop_reason: raw
            .get("stop_reason")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        usage: Usage {
            input_tokens: usage_field("input_tokens"),
            output_tokens: usage_field("output_tokens"),
        },
    })
}

/// Parse an Anthropic error response into an `Error`.
pub(crate) fn parse_error(
    status: u16,
    headers: &reqwest::header::HeaderMap,
    body: serde_json::Value,
) -> Error {
    let (message, code) =
        crate::util::http::error_message_and_code(&body, &["error", "message"], &["error", "type"]);
    let retry_after = crate::util::http::parse_retry_after(headers);

    let mut err = Error::from_http_status(status, message, Some(body), retry_after);
    err.error_code = code;
    err
}
