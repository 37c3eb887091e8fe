use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::message::Message;

/// A provider that turns a message list into one completion
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub options: ChatOptions,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: ChatOptions::default(),
        }
    }

    /// A request made of one user message
    pub fn prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(model, vec![Message::user(prompt)])
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    /// Text of the last message, if any
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}

/// Sampling knobs; unset fields are left to the provider's defaults
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChatOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(self, temperature: f32) -> Self {
        Self {
            temperature: Some(temperature),
            ..self
        }
    }

    pub fn max_tokens(self, max_tokens: u32) -> Self {
        Self {
            max_tokens: Some(max_tokens),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatResponse {
    /// First choice's text; `None` when the provider sent no text
    pub content: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}

impl ChatResponse {
    /// Completed response with text only
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            finish_reason: Some("stop".to_string()),
            usage: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_request() {
        let request = ChatRequest::prompt("gpt-4o", "Inspect the shell?");
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.messages, vec![Message::user("Inspect the shell?")]);
        assert_eq!(request.last_content(), Some("Inspect the shell?"));
        assert_eq!(request.options, ChatOptions::default());
    }

    #[test]
    fn test_options_builder() {
        let request = ChatRequest::prompt("gpt-4o", "Hi")
            .with_options(ChatOptions::new().temperature(0.1).max_tokens(100));
        assert_eq!(request.options.temperature, Some(0.1));
        assert_eq!(request.options.max_tokens, Some(100));
    }

    #[test]
    fn test_text_response() {
        let response = ChatResponse::text("Inspect the shell.");
        assert_eq!(response.content.as_deref(), Some("Inspect the shell."));
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert!(response.usage.is_none());
    }
}
