pub mod ask;
pub mod message;

pub use ask::{AskRequest, AskResponse, ErrorBody};
pub use message::{ChatMessage, MessageKind};
