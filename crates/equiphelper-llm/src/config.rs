use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use crate::chat::ChatClient;
use crate::openai::{OpenAIClient, OPENAI_API_BASE};

/// Credentials and endpoint of the chat completion provider
#[derive(Clone)]
pub struct ProviderConfig {
    api_key: String,
    base_url: Option<String>,
}

impl ProviderConfig {
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    /// Use an OpenAI-compatible endpoint instead of api.openai.com
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(OPENAI_API_BASE)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url())
            .finish()
    }
}

pub struct ClientFactory;

impl ClientFactory {
    pub fn create_chat_client(config: ProviderConfig) -> Result<Arc<dyn ChatClient>> {
        let client = OpenAIClient::with_base_url(&config.api_key, config.base_url())?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = ProviderConfig::openai("sk-test");
        assert_eq!(config.base_url(), "https://api.openai.com/v1");
    }

    #[test]
    fn test_base_url_override() {
        let config = ProviderConfig::openai("sk-test").with_base_url("http://localhost:9999/v1");
        assert_eq!(config.base_url(), "http://localhost:9999/v1");
    }

    #[test]
    fn test_debug_hides_key() {
        let printed = format!("{:?}", ProviderConfig::openai("sk-secret"));
        assert!(!printed.contains("sk-secret"));
    }

    #[test]
    fn test_factory_builds_client() {
        assert!(ClientFactory::create_chat_client(ProviderConfig::openai("sk-test")).is_ok());
    }
}
