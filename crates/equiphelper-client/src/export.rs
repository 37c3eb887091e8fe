//! Printable export of the conversation
//!
//! Layout is computed first ([`layout_document`]) and rendered to PDF
//! separately so pagination can be inspected without parsing the output.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use equiphelper_types::{ChatMessage, MessageKind};
use printpdf::{BuiltinFont, Color, Mm, PdfDocument, Rgb};
use thiserror::Error;

pub const DOCUMENT_TITLE: &str = "equipHelper Chat History";
pub const EXPORT_FILE_NAME: &str = "equipHelper_Chat_History.pdf";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_X_MM: f32 = 10.0;
const TITLE_Y_MM: f32 = 10.0;
const TITLE_FONT_PT: f32 = 20.0;
const BODY_FONT_PT: f32 = 12.0;
const FIRST_LINE_Y_MM: f32 = 20.0;
const LINE_ADVANCE_MM: f32 = 10.0;
const PAGE_BREAK_Y_MM: f32 = 280.0;
const NEW_PAGE_Y_MM: f32 = 10.0;

/// Characters per line for 12pt Helvetica across a 180mm text width
pub const WRAP_COLUMNS: usize = 85;

const TITLE_COLOR: Rgb8 = Rgb8(0, 0, 0);
const USER_COLOR: Rgb8 = Rgb8(0, 102, 204);
const AI_COLOR: Rgb8 = Rgb8(255, 165, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    fn to_color(self) -> Color {
        Color::Rgb(Rgb::new(
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
            None,
        ))
    }
}

/// One line of text at a position measured from the top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub font_size: f32,
    pub color: Rgb8,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentLayout {
    pub pages: Vec<Vec<PlacedLine>>,
}

impl DocumentLayout {
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flatten()
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render PDF: {0}")]
    Pdf(String),
}

pub fn layout_document(messages: &[ChatMessage]) -> DocumentLayout {
    let mut pages = vec![vec![PlacedLine {
        text: DOCUMENT_TITLE.to_string(),
        x_mm: MARGIN_X_MM,
        y_mm: TITLE_Y_MM,
        font_size: TITLE_FONT_PT,
        color: TITLE_COLOR,
    }]];
    let mut y = FIRST_LINE_Y_MM;

    for message in messages {
        let color = match message.kind {
            MessageKind::User => USER_COLOR,
            MessageKind::Ai => AI_COLOR,
        };
        let labelled = format!("{}: {}", message.kind.sender(), message.text);

        for line in wrap_text(&labelled, WRAP_COLUMNS) {
            if y > PAGE_BREAK_Y_MM {
                pages.push(Vec::new());
                y = NEW_PAGE_Y_MM;
            }
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    text: line,
                    x_mm: MARGIN_X_MM,
                    y_mm: y,
                    font_size: BODY_FONT_PT,
                    color,
                });
            }
            y += LINE_ADVANCE_MM;
        }
    }

    DocumentLayout { pages }
}

/// Greedy word wrap; embedded newlines start new lines and overlong words
/// are split
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut width = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            if width > 0 && width + 1 + word.len() > columns {
                lines.push(std::mem::take(&mut current));
                width = 0;
            }
            while word.len() > columns {
                if width > 0 {
                    lines.push(std::mem::take(&mut current));
                    width = 0;
                }
                let rest = word.split_off(columns);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            if width > 0 {
                current.push(' ');
                width += 1;
            }
            width += word.len();
            current.extend(word);
        }

        lines.push(current);
    }

    lines
}

/// Builtin PDF fonts only cover Latin-1; drop what they cannot draw
fn printable(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{2018}' | '\u{2019}' => Some('\''),
            '\u{201C}' | '\u{201D}' => Some('"'),
            '\u{2013}' | '\u{2014}' => Some('-'),
            ' '..='~' | '\u{A0}'..='\u{FF}' => Some(c),
            _ => None,
        })
        .collect::<String>()
        .trim_start()
        .to_string()
}

pub fn write_pdf(layout: &DocumentLayout, path: &Path) -> Result<(), ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    for (index, lines) in layout.pages.iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1")
        };
        let layer = doc.get_page(page).get_layer(layer);

        for line in lines {
            layer.set_fill_color(line.color.to_color());
            layer.use_text(
                printable(&line.text),
                line.font_size,
                Mm(line.x_mm),
                Mm(PAGE_HEIGHT_MM - line.y_mm),
                &font,
            );
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    doc.save(&mut writer)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(())
}

/// Writes `equipHelper_Chat_History.pdf` into `dir` and returns its path
pub fn export_conversation(messages: &[ChatMessage], dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(EXPORT_FILE_NAME);
    let layout = layout_document(messages);
    write_pdf(&layout, &path)?;
    tracing::info!(
        path = %path.display(),
        pages = layout.pages.len(),
        "Exported conversation"
    );
    Ok(path)
}
