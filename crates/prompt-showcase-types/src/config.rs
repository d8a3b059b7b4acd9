use serde::{Deserialize, Serialize};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Token ceiling used when none is configured.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// HTTP timeout configuration for the completion client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterTimeout {
    /// Connection timeout in seconds (default: 10.0).
    pub connect: f64,
    /// Whole-request timeout in seconds (default: 120.0).
    pub request: f64,
}

impl Default for AdapterTimeout {
    fn default() -> Self {
        Self {
            connect: 10.0,
            request: 120.0,
        }
    }
}

/// Settings shared by every request the completion client sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub model: String,
    pub max_tokens: u32,
    /// Overrides the provider's default endpoint (proxies, tests).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub timeout: AdapterTimeout,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: None,
            timeout: AdapterTimeout::default(),
        }
    }
}

impl ServiceConfig {
    /// Builder-style setter for model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder-style setter for max_tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Builder-style setter for base_url.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Builder-style setter for timeout.
    pub fn timeout(mut self, timeout: AdapterTimeout) -> Self {
        self.timeout = timeout;
        self
    }
}
