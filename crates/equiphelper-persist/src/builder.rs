use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::{ExpiringTranscriptStore, InMemoryTranscriptStore, TranscriptStore};

/// Chooses a transcript backend from retention settings
pub struct TranscriptStoreBuilder {
    ttl: Option<Duration>,
}

impl TranscriptStoreBuilder {
    pub fn new() -> Self {
        Self { ttl: None }
    }
    
    /// Forget sessions idle longer than `ttl`. A zero TTL keeps sessions forever.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = if ttl.is_zero() { None } else { Some(ttl) };
        self
    }
    
    pub fn build(self) -> Result<Arc<dyn TranscriptStore>> {
        match self.ttl {
            Some(ttl) => {
                tracing::info!(ttl_secs = ttl.as_secs(), "Using expiring transcript store");
                Ok(Arc::new(ExpiringTranscriptStore::new(ttl)?))
            }
            None => {
                tracing::info!("Using unbounded in-memory transcript store");
                Ok(Arc::new(InMemoryTranscriptStore::new()))
            }
        }
    }
}

impl Default for TranscriptStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Turn;

    #[tokio::test]
    async fn test_default_builds_working_store() {
        let store = TranscriptStoreBuilder::new().build().unwrap();
        store.append("s", Turn::new("q", "a")).await.unwrap();
        assert_eq!(store.get("s").await.unwrap().len(), 2);
    }

    #[test]
    fn test_zero_ttl_means_unbounded() {
        let builder = TranscriptStoreBuilder::new().ttl(Duration::ZERO);
        assert!(builder.ttl.is_none());
    }
}
