// Concrete completion services.

pub mod anthropic;

pub use anthropic::AnthropicService;
