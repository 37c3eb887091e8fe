use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

use crate::chat::{ChatClient, ChatRequest, ChatResponse, TokenUsage};
use crate::message::Message;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Chat completions over plain HTTP
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(api_key: impl AsRef<str>) -> Result<Self> {
        Self::with_base_url(api_key, OPENAI_API_BASE)
    }

    pub fn with_base_url(api_key: impl AsRef<str>, base_url: impl AsRef<str>) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.as_ref()))
            .context("Invalid API key format")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        })
    }
}

/// `o1*` and `gpt-5*` reject `temperature` and take `max_completion_tokens`
fn is_reasoning_model(model: &str) -> bool {
    model.starts_with("o1") || model.starts_with("gpt-5")
}

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
}

impl<'a> CompletionBody<'a> {
    fn from_request(request: &'a ChatRequest) -> Self {
        let reasoning = is_reasoning_model(&request.model);
        let options = request.options;
        Self {
            model: &request.model,
            messages: &request.messages,
            stream: false,
            temperature: options.temperature.filter(|_| !reasoning),
            max_tokens: options.max_tokens.filter(|_| !reasoning),
            max_completion_tokens: options.max_tokens.filter(|_| reasoning),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionReply {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl From<CompletionReply> for ChatResponse {
    fn from(reply: CompletionReply) -> Self {
        let choice = reply.choices.into_iter().next();
        Self {
            finish_reason: choice.as_ref().and_then(|c| c.finish_reason.clone()),
            content: choice.and_then(|c| c.message.content),
            usage: reply.usage,
        }
    }
}

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&CompletionBody::from_request(&request))
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API error ({}): {}", status, body);
        }

        let reply: CompletionReply = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        if let Some(usage) = &reply.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        Ok(reply.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatOptions;

    fn body_json(request: &ChatRequest) -> serde_json::Value {
        serde_json::to_value(CompletionBody::from_request(request)).unwrap()
    }

    #[test]
    fn test_body_for_chat_models() {
        let request = ChatRequest::prompt("gpt-4o", "Hi")
            .with_options(ChatOptions::new().temperature(0.1).max_tokens(50));
        let body = body_json(&request);

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Hi");
        assert!((body["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
        assert_eq!(body["max_tokens"], 50);
        assert!(body.get("max_completion_tokens").is_none());
    }

    #[test]
    fn test_body_for_reasoning_models() {
        let request = ChatRequest::prompt("gpt-5-mini", "Hi")
            .with_options(ChatOptions::new().temperature(0.1).max_tokens(50));
        let body = body_json(&request);

        assert!(body.get("temperature").is_none());
        assert!(body.get("max_tokens").is_none());
        assert_eq!(body["max_completion_tokens"], 50);
    }

    #[test]
    fn test_unset_options_are_omitted() {
        let body = body_json(&ChatRequest::prompt("gpt-4o", "Hi"));
        assert!(body.get("temperature").is_none());
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_reply_without_choices_has_no_content() {
        let reply: CompletionReply = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let response = ChatResponse::from(reply);
        assert!(response.content.is_none());
        assert!(response.finish_reason.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = OpenAIClient::with_base_url("k", "http://localhost:1234/v1/").unwrap();
        assert_eq!(client.base_url, "http://localhost:1234/v1");
    }
}
