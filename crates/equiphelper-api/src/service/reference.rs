use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Source of equipment reference documents
#[async_trait]
pub trait ReferenceFetcher: Send + Sync {
    /// Fetch and parse one JSON document
    async fn fetch(&self, url: &str) -> Result<Value>;
}

/// Fetches reference documents over HTTP GET
pub struct HttpReferenceFetcher {
    http_client: reqwest::Client,
}

impl HttpReferenceFetcher {
    pub fn new() -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl ReferenceFetcher for HttpReferenceFetcher {
    async fn fetch(&self, url: &str) -> Result<Value> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;
        
        if !response.status().is_success() {
            anyhow::bail!("Reference source returned {}", response.status());
        }
        
        response
            .json::<Value>()
            .await
            .context("Reference document is not valid JSON")
    }
}

/// The parts of a reference record used for image matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub keywords: Vec<String>,
    pub image_url: Option<String>,
}

impl ReferenceEntry {
    /// Best-effort read of one record; non-objects yield `None`
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let keywords = object
            .get("keywords")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let image_url = object
            .get("imageUrl")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(Self { keywords, image_url })
    }
    
    /// Entries of a fetched document, which is either one record or an array of them
    pub fn all_from_document(document: &Value) -> Vec<Self> {
        match document {
            Value::Array(items) => items.iter().filter_map(Self::from_value).collect(),
            other => Self::from_value(other).into_iter().collect(),
        }
    }
}
