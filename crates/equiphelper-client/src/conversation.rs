use equiphelper_types::ChatMessage;

/// Introductory assistant message shown before any real interaction
pub const GREETING: &str = "👨‍🚒 Hey there! I'm equipHelper, your expert assistant for all things firefighting equipment! 🧰 Need help with maintaining your gear, or have questions about equipment care and inspection? Let’s make sure you're well-prepared for every emergency with properly maintained gear! 🚒💡";

/// Assistant message shown when the answer service cannot be reached or fails
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong.";

/// Ordered message sequence plus the first-visit flag
///
/// While `first_visit` holds, the sequence is exactly the greeting. The first
/// user message replaces it rather than following it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    first_visit: bool,
}

impl Conversation {
    pub fn fresh() -> Self {
        Self {
            messages: vec![ChatMessage::ai(GREETING)],
            first_visit: true,
        }
    }

    /// Conversation restored from storage; an empty record counts as absent
    pub fn restored(messages: Vec<ChatMessage>) -> Self {
        if messages.is_empty() {
            return Self::fresh();
        }
        Self {
            messages,
            first_visit: false,
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        if self.first_visit {
            self.first_visit = false;
            if !self.messages.is_empty() {
                self.messages.remove(0);
            }
        }
        self.messages.push(ChatMessage::user(text));
    }

    pub fn push_ai(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::ai(text));
    }

    pub fn reset(&mut self) {
        *self = Self::fresh();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_first_visit(&self) -> bool {
        self.first_visit
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::fresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equiphelper_types::MessageKind;

    #[test]
    fn test_fresh_has_only_greeting() {
        let conversation = Conversation::fresh();
        assert!(conversation.is_first_visit());
        assert_eq!(conversation.messages(), &[ChatMessage::ai(GREETING)]);
    }

    #[test]
    fn test_first_user_message_replaces_greeting() {
        let mut conversation = Conversation::fresh();
        conversation.push_user("How do I store my hood?");
        assert!(!conversation.is_first_visit());
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].kind, MessageKind::User);

        conversation.push_ai("Dry it flat.");
        conversation.push_user("And gloves?");
        assert_eq!(conversation.len(), 3);
    }

    #[test]
    fn test_restored_is_not_first_visit() {
        let conversation = Conversation::restored(vec![
            ChatMessage::user("Q"),
            ChatMessage::ai("A"),
        ]);
        assert!(!conversation.is_first_visit());

        let mut conversation = conversation;
        conversation.push_user("Q2");
        assert_eq!(conversation.len(), 3);
    }

    #[test]
    fn test_restored_empty_starts_fresh() {
        assert_eq!(Conversation::restored(Vec::new()), Conversation::fresh());
    }

    #[test]
    fn test_reset() {
        let mut conversation = Conversation::restored(vec![ChatMessage::user("Q")]);
        conversation.reset();
        assert_eq!(conversation, Conversation::fresh());
    }
}
