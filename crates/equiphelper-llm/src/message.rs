use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Plain-text chat message, serialized in the chat completions wire shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(Message::user("How do I store my hood?")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "How do I store my hood?");

        let back: Message =
            serde_json::from_str(r#"{"role":"assistant","content":"Flat, out of sunlight."}"#).unwrap();
        assert_eq!(back, Message::new(Role::Assistant, "Flat, out of sunlight."));
    }

    #[test]
    fn test_role_names() {
        let json = serde_json::to_value(Message::new(Role::System, "x")).unwrap();
        assert_eq!(json["role"], "system");
    }
}
