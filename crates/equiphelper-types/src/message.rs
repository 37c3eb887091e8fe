use serde::{Deserialize, Serialize};

/// Who authored a displayed message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Ai,
}

impl MessageKind {
    /// Label shown next to the message and in exported documents
    pub fn sender(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Ai => "equipHelper",
        }
    }
}

/// One entry of the conversation shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::User,
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Ai,
        }
    }
}
