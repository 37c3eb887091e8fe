//! Chat completion client for OpenAI-compatible endpoints

pub mod chat;
pub mod config;
pub mod message;
pub mod openai;

pub use chat::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
pub use config::{ClientFactory, ProviderConfig};
pub use message::{Message, Role};
pub use openai::OpenAIClient;
