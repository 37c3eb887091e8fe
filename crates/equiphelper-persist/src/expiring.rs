use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{PersistError, Result};
use crate::models::Turn;
use crate::store::TranscriptStore;

struct Session {
    lines: Vec<String>,
    touched_at: DateTime<Utc>,
}

/// Store that forgets sessions idle for longer than `ttl`
/// 
/// Expired sessions read as empty and are purged on the next write.
pub struct ExpiringTranscriptStore {
    ttl: chrono::Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl ExpiringTranscriptStore {
    pub fn new(ttl: Duration) -> Result<Self> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| PersistError::Internal(format!("TTL out of range: {}", e)))?;
        Ok(Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        })
    }
    
    fn is_live(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now - session.touched_at <= self.ttl
    }
    
    async fn get_at(&self, session_id: &str, now: DateTime<Utc>) -> Vec<String> {
        let sessions = self.sessions.read().await;
        match sessions.get(session_id) {
            Some(session) if self.is_live(session, now) => session.lines.clone(),
            _ => Vec::new(),
        }
    }
    
    async fn append_at(&self, session_id: &str, turn: Turn, now: DateTime<Utc>) -> Result<()> {
        if session_id.is_empty() {
            return Err(PersistError::InvalidSessionId(session_id.to_string()));
        }
        
        let mut sessions = self.sessions.write().await;
        
        let before = sessions.len();
        sessions.retain(|_, session| now - session.touched_at <= self.ttl);
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::debug!(purged, "Purged expired sessions");
        }
        
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session {
                lines: Vec::new(),
                touched_at: now,
            });
        session.lines.extend(turn.lines());
        session.touched_at = now;
        Ok(())
    }
    
    async fn len_at(&self, now: DateTime<Utc>) -> usize {
        let sessions = self.sessions.read().await;
        sessions.values().filter(|s| self.is_live(s, now)).count()
    }
}

#[async_trait]
impl TranscriptStore for ExpiringTranscriptStore {
    async fn get(&self, session_id: &str) -> Result<Vec<String>> {
        Ok(self.get_at(session_id, Utc::now()).await)
    }
    
    async fn append(&self, session_id: &str, turn: Turn) -> Result<()> {
        self.append_at(session_id, turn, Utc::now()).await
    }
    
    async fn len(&self) -> Result<usize> {
        Ok(self.len_at(Utc::now()).await)
    }
}
