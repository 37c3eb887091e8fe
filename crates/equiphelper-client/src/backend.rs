use async_trait::async_trait;
use equiphelper_types::{AskRequest, AskResponse};
use reqwest::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Answer service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Port to the answer service
#[async_trait]
pub trait AskBackend: Send + Sync {
    async fn ask(&self, request: AskRequest) -> Result<AskResponse, BackendError>;
}

/// Calls `POST {server}/api/ask`
#[derive(Debug, Clone)]
pub struct HttpAskBackend {
    client: Client,
    endpoint: String,
}

impl HttpAskBackend {
    pub fn new(server: impl AsRef<str>) -> Self {
        Self::with_client(Client::new(), server)
    }

    pub fn with_client(client: Client, server: impl AsRef<str>) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/ask", server.as_ref().trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AskBackend for HttpAskBackend {
    async fn ask(&self, request: AskRequest) -> Result<AskResponse, BackendError> {
        tracing::debug!(endpoint = %self.endpoint, "Sending question");

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let backend = HttpAskBackend::new("http://localhost:3000/");
        assert_eq!(backend.endpoint(), "http://localhost:3000/api/ask");
    }
}
