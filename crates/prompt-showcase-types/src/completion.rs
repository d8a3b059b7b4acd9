use serde::{Deserialize, Serialize};

/// Token accounting reported alongside a completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// The completion service's reply to one conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub id: String,
    pub model: String,
    /// Generated text, all text blocks concatenated.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
    pub usage: Usage,
}

impl Completion {
    /// Convenience: a completion carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_total() {
        let usage = Usage {
            input_tokens: 12,
            output_tokens: 30,
        };
        assert_eq!(usage.total_tokens(), 42);
    }

    #[test]
    fn test_completion_text_constructor() {
        let c = Completion::text("hello");
        assert_eq!(c.text, "hello");
        assert!(c.id.is_empty());
        assert!(c.stop_reason.is_none());
        assert_eq!(c.usage, Usage::default());
    }
}
