use serde::{Deserialize, Serialize};

const USER_PREFIX: &str = "User: ";
const ASSISTANT_PREFIX: &str = "Assistant: ";

/// One completed question/answer exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub question: String,
    pub answer: String,
}

impl Turn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Transcript lines for this turn, user line first
    pub fn lines(&self) -> [String; 2] {
        [
            format!("{}{}", USER_PREFIX, self.question),
            format!("{}{}", ASSISTANT_PREFIX, self.answer),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_alternate_user_then_assistant() {
        let turn = Turn::new("How do I store my hood?", "Dry it first.");
        assert_eq!(
            turn.lines(),
            [
                "User: How do I store my hood?".to_string(),
                "Assistant: Dry it first.".to_string(),
            ]
        );
    }
}
