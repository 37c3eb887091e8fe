use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{PersistError, Result};
use crate::models::Turn;
use crate::store::TranscriptStore;

/// Process-local store with no eviction
#[derive(Default)]
pub struct InMemoryTranscriptStore {
    sessions: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryTranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TranscriptStore for InMemoryTranscriptStore {
    async fn get(&self, session_id: &str) -> Result<Vec<String>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned().unwrap_or_default())
    }
    
    async fn append(&self, session_id: &str, turn: Turn) -> Result<()> {
        if session_id.is_empty() {
            return Err(PersistError::InvalidSessionId(session_id.to_string()));
        }
        
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .extend(turn.lines());
        Ok(())
    }
    
    async fn len(&self) -> Result<usize> {
        Ok(self.sessions.read().await.len())
    }
}
