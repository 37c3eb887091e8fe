use std::fmt;

use equiphelper_persist::PersistError;
use thiserror::Error;

/// External call guarded by a deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ReferenceFetch,
    Completion,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::ReferenceFetch => write!(f, "reference fetch"),
            Stage::Completion => write!(f, "completion"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("Failed to fetch reference data from {url}: {source}")]
    ReferenceFetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    
    #[error("{stage} timed out after {elapsed_ms} ms")]
    Timeout { stage: Stage, elapsed_ms: u128 },
    
    #[error("LLM call failed: {0}")]
    Llm(#[source] anyhow::Error),
    
    #[error("LLM returned no text")]
    EmptyAnswer,
    
    #[error("Transcript store error: {0}")]
    Store(#[from] PersistError),
}
