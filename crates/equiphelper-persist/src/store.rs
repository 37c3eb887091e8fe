use async_trait::async_trait;

use crate::error::Result;
use crate::models::Turn;

/// Storage for per-session transcripts
/// 
/// A transcript is the ordered list of `"User: …"` / `"Assistant: …"` lines
/// accumulated for one session identifier. Implementations decide retention.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Transcript for a session, empty when the session is unknown
    async fn get(&self, session_id: &str) -> Result<Vec<String>>;
    
    /// Append a completed turn, creating the session if needed
    async fn append(&self, session_id: &str, turn: Turn) -> Result<()>;
    
    /// Number of sessions currently held
    async fn len(&self) -> Result<usize>;
}
