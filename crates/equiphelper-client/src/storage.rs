//! Client-local persistence of the visible conversation
//!
//! The whole message sequence is stored as one JSON array under a fixed key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use equiphelper_types::ChatMessage;
use thiserror::Error;

/// Key the conversation is stored under
pub const STORAGE_KEY: &str = "chatMessages";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Stored conversation is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

pub trait ConversationStorage: Send + Sync {
    /// `None` when nothing has been stored
    fn load(&self) -> Result<Option<Vec<ChatMessage>>, StorageError>;

    fn save(&self, messages: &[ChatMessage]) -> Result<(), StorageError>;

    fn clear(&self) -> Result<(), StorageError>;
}

/// Stores the conversation as `<dir>/chatMessages.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", STORAGE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationStorage for FileStorage {
    fn load(&self) -> Result<Option<Vec<ChatMessage>>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, messages: &[ChatMessage]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(messages)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-process storage holding the serialized record
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<ChatMessage>>, StorageError> {
        let slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        slot.as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(StorageError::from)
    }

    fn save(&self, messages: &[ChatMessage]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(messages)?;
        *self.slot.lock().map_err(|_| StorageError::Poisoned)? = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock().map_err(|_| StorageError::Poisoned)? = None;
        Ok(())
    }
}

impl<S: ConversationStorage + ?Sized> ConversationStorage for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<Vec<ChatMessage>>, StorageError> {
        (**self).load()
    }

    fn save(&self, messages: &[ChatMessage]) -> Result<(), StorageError> {
        (**self).save(messages)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}
