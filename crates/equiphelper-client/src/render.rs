use std::sync::OnceLock;

use equiphelper_types::{ChatMessage, MessageKind};
use regex::Regex;

/// Display unit of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Paragraph(String),
    /// Inline image reference such as `/PPE Images/helmet.png`
    Image(String),
}

fn image_token() -> &'static Regex {
    static IMAGE_TOKEN: OnceLock<Regex> = OnceLock::new();
    IMAGE_TOKEN.get_or_init(|| Regex::new(r"/PPE Images/.*?\.png").expect("image token pattern"))
}

/// Splits assistant text into paragraphs and image references
///
/// Text between image tokens is trimmed; whitespace-only pieces are dropped.
pub fn render_message_text(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for token in image_token().find_iter(text) {
        push_paragraph(&mut segments, &text[last..token.start()]);
        segments.push(Segment::Image(token.as_str().to_string()));
        last = token.end();
    }
    push_paragraph(&mut segments, &text[last..]);

    segments
}

fn push_paragraph(segments: &mut Vec<Segment>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        segments.push(Segment::Paragraph(piece.to_string()));
    }
}

/// User text is shown verbatim; assistant text gets image extraction
pub fn render_message(message: &ChatMessage) -> Vec<Segment> {
    match message.kind {
        MessageKind::User => vec![Segment::Paragraph(message.text.clone())],
        MessageKind::Ai => render_message_text(&message.text),
    }
}
