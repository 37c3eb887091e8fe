pub mod backend;
pub mod catalog;
pub mod conversation;
pub mod export;
pub mod render;
pub mod session;
pub mod storage;

pub use backend::{AskBackend, BackendError, HttpAskBackend};
pub use catalog::{CatalogError, Equipment, EquipmentCatalog};
pub use conversation::{Conversation, FALLBACK_REPLY, GREETING};
pub use export::{export_conversation, layout_document, DocumentLayout, ExportError, EXPORT_FILE_NAME};
pub use render::{render_message, render_message_text, Segment};
pub use session::{ChatSession, SubmitOutcome};
pub use storage::{ConversationStorage, FileStorage, MemoryStorage, StorageError, STORAGE_KEY};
