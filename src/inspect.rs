//! Document outline for inspection.
//!
//! Lists every block with visible text together with its style, which is
//! what you need to see before writing a content map.

use crate::docx::StyleMap;
use crate::model::{Block, BodyContent, Document};
use serde::Serialize;
use std::fmt::Write;

/// Characters of block text shown in an outline entry.
pub const PREVIEW_CHARS: usize = 100;

const RULE_WIDTH: usize = 80;

/// Kind of block in an outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading,
    Paragraph,
    Table,
    Other,
}

/// One block of the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    /// Block index in the document
    pub index: usize,
    pub kind: BlockKind,
    /// Style name as shown in Word
    pub style: String,
    /// Heading level, for headings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Trimmed text, cut to [`PREVIEW_CHARS`] characters
    pub text: String,
}

/// Outline of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
    pub total_blocks: usize,
    pub heading_count: usize,
}

/// Build the outline of a document.
pub fn outline(doc: &Document, styles: &StyleMap) -> Outline {
    let entries = doc
        .blocks()
        .iter()
        .enumerate()
        .filter_map(|(index, block)| entry(index, block, styles))
        .collect();

    Outline {
        entries,
        total_blocks: doc.len(),
        heading_count: doc.blocks().iter().filter(|b| b.is_heading()).count(),
    }
}

fn entry(index: usize, block: &Block, styles: &StyleMap) -> Option<OutlineEntry> {
    let text = block.plain_text();
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (kind, style, level) = match block {
        Block::Heading(heading) => (
            BlockKind::Heading,
            heading.style_name(),
            Some(heading.level().level()),
        ),
        Block::Body(body) => match body.content() {
            BodyContent::Paragraph(para) => (
                BlockKind::Paragraph,
                para.style
                    .clone()
                    .unwrap_or_else(|| styles.default_paragraph_name()),
                None,
            ),
            BodyContent::Table(table) => (
                BlockKind::Table,
                table.style.clone().unwrap_or_else(|| "Table".to_string()),
                None,
            ),
            BodyContent::PageBreak => return None,
            BodyContent::Other { element, .. } => (BlockKind::Other, element.clone(), None),
        },
    };

    Some(OutlineEntry {
        index,
        kind,
        style,
        level,
        text: preview(text),
    })
}

/// Cut text to the preview length, marking the cut with "...".
fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

impl Outline {
    /// Render the outline as a plain-text report.
    pub fn to_text(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "DOCUMENT STRUCTURE");
        let _ = writeln!(out, "{}", rule);
        for entry in &self.entries {
            let _ = writeln!(out, "\n[Block {}] Style: {}", entry.index, entry.style);
            let _ = writeln!(out, "Text: {}", entry.text);
        }
        let _ = writeln!(out, "\n{}", rule);
        let _ = writeln!(
            out,
            "Total blocks: {} ({} headings)",
            self.total_blocks, self.heading_count
        );
        let _ = writeln!(out, "{}", rule);
        out
    }

    /// Serialize the outline to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Body, HeadingLevel, Paragraph, Table};

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.add_heading(HeadingLevel::H1, "CHAPTER 1 INTRODUCTION");
        doc.add_blank_line();
        doc.push(Paragraph::with_text("  Body paragraph  ").with_style("Body Text"));
        doc.push(Table::from_rows([["a", "b"]]));
        doc.push(Body::page_break());
        doc.add_paragraph("x".repeat(150));
        doc
    }

    #[test]
    fn test_outline_entries() {
        let outline = outline(&sample(), &StyleMap::default());

        assert_eq!(outline.total_blocks, 6);
        assert_eq!(outline.heading_count, 1);
        let indexes: Vec<_> = outline.entries.iter().map(|e| e.index).collect();
        assert_eq!(indexes, vec![0, 2, 3, 5]);

        let heading = &outline.entries[0];
        assert_eq!(heading.kind, BlockKind::Heading);
        assert_eq!(heading.style, "Heading 1");
        assert_eq!(heading.level, Some(1));

        assert_eq!(outline.entries[1].text, "Body paragraph");
        assert_eq!(outline.entries[1].style, "Body Text");
        assert_eq!(outline.entries[2].kind, BlockKind::Table);
        // Unstyled paragraphs report the default style
        assert_eq!(outline.entries[3].style, "Normal");
        assert_eq!(outline.entries[3].text.chars().count(), PREVIEW_CHARS + 3);
        assert!(outline.entries[3].text.ends_with("..."));
    }

    #[test]
    fn test_preview_multibyte() {
        let text = "é".repeat(120);
        let cut = preview(&text);
        assert_eq!(cut.chars().count(), PREVIEW_CHARS + 3);
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_to_text() {
        let report = outline(&sample(), &StyleMap::default()).to_text();
        assert!(report.starts_with(&"=".repeat(80)));
        assert!(report.contains("DOCUMENT STRUCTURE"));
        assert!(report.contains("\n[Block 0] Style: Heading 1\nText: CHAPTER 1 INTRODUCTION\n"));
        assert!(report.contains("Total blocks: 6 (1 headings)"));
    }

    #[test]
    fn test_to_json() {
        let json = outline(&sample(), &StyleMap::default()).to_json().unwrap();
        assert!(json.contains("\"kind\": \"heading\""));
        assert!(json.contains("\"total_blocks\": 6"));
    }
}
