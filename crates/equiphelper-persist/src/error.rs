use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Invalid session ID: {0:?}")]
    InvalidSessionId(String),
    
    #[error("Backend error: {0}")]
    Backend(String),
    
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;
