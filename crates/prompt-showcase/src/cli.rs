// Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use prompt_showcase_types::{AdapterTimeout, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, ServiceConfig};

use crate::demos::Suite;

/// Run a sequence of prompt demos against the Anthropic Messages API.
#[derive(Debug, Clone, Parser)]
#[command(name = "prompt-showcase", version, about)]
pub struct Args {
    /// Which demos to run
    #[arg(long, value_enum, default_value_t = Suite::Full)]
    pub suite: Suite,

    /// Model to send every prompt to
    #[arg(long, env = "SHOWCASE_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Maximum tokens per reply
    #[arg(long, env = "SHOWCASE_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Dotenv file to load credentials from
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Override the API endpoint
    #[arg(long, env = "ANTHROPIC_BASE_URL")]
    pub base_url: Option<String>,

    /// Connection timeout in seconds
    #[arg(long, env = "SHOWCASE_CONNECT_TIMEOUT", default_value_t = 10.0)]
    pub connect_timeout: f64,

    /// Whole-request timeout in seconds
    #[arg(long, env = "SHOWCASE_REQUEST_TIMEOUT", default_value_t = 120.0)]
    pub request_timeout: f64,

    /// Exit with status 1 when any demo fails
    #[arg(long)]
    pub fail_on_error: bool,
}

impl Args {
    /// Request settings for the completion client.
    pub fn service_config(&self) -> ServiceConfig {
        let mut config = ServiceConfig::default()
            .model(&self.model)
            .max_tokens(self.max_tokens)
            .timeout(AdapterTimeout {
                connect: self.connect_timeout,
                request: self.request_timeout,
            });
        if let Some(base_url) = &self.base_url {
            config = config.base_url(base_url);
        }
        config
    }
}
