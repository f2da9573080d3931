//! Paragraph and text run models.

use serde::{Deserialize, Serialize};

/// Text alignment within a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlignment {
    /// The `w:jc` value for this alignment.
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            TextAlignment::Left => "left",
            TextAlignment::Center => "center",
            TextAlignment::Right => "right",
            TextAlignment::Justify => "both",
        }
    }
}

/// Heading level (h1-h6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Create a heading level from a number (1-6).
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            4 => Some(HeadingLevel::H4),
            5 => Some(HeadingLevel::H5),
            6 => Some(HeadingLevel::H6),
            _ => None,
        }
    }

    /// Get the numeric level (1-6).
    pub fn level(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }

    /// Built-in style name for this level, e.g. "Heading 2".
    pub fn style_name(&self) -> String {
        format!("Heading {}", self.level())
    }
}

/// Run-level formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,

    /// Font name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    /// Font size in half-points (e.g., 24 = 12pt)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    /// Text color (hex, e.g., "8B0000")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TextStyle {
    /// Create a bold style.
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    /// Set the font name.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Set the font size in points.
    pub fn with_size_pt(mut self, points: u32) -> Self {
        self.size = Some(points.saturating_mul(2));
        self
    }

    /// Check if style has any formatting.
    pub fn has_formatting(&self) -> bool {
        *self != TextStyle::default()
    }
}

/// A run of text with consistent styling.
///
/// `\n` in the text is a line break and `\t` a tab; both stay inside the
/// paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,

    #[serde(default, skip_serializing_if = "is_default_style")]
    pub style: TextStyle,
}

fn is_default_style(style: &TextStyle) -> bool {
    *style == TextStyle::default()
}

impl TextRun {
    /// Create a plain text run with no styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a styled text run.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A paragraph of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in this paragraph
    #[serde(default)]
    pub runs: Vec<TextRun>,

    /// Paragraph style name (e.g. "Body Text", "List Bullet")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(default, skip_serializing_if = "is_default_alignment")]
    pub alignment: TextAlignment,

    /// Space after the paragraph in twentieths of a point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing_after: Option<u32>,
}

fn is_default_alignment(a: &TextAlignment) -> bool {
    *a == TextAlignment::Left
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with the given text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::plain(text)],
            ..Default::default()
        }
    }

    /// Set the paragraph style name.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Set the alignment.
    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the space after the paragraph, in points.
    pub fn with_spacing_after_pt(mut self, points: u32) -> Self {
        self.spacing_after = Some(points.saturating_mul(20));
        self
    }

    /// Add a text run to this paragraph.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if this paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level() {
        assert_eq!(HeadingLevel::from_number(1), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_number(6), Some(HeadingLevel::H6));
        assert_eq!(HeadingLevel::from_number(7), None);
        assert_eq!(HeadingLevel::from_number(0), None);

        assert_eq!(HeadingLevel::H3.level(), 3);
        assert_eq!(HeadingLevel::H2.style_name(), "Heading 2");
        assert!(HeadingLevel::H1 < HeadingLevel::H4);
    }

    #[test]
    fn test_text_style() {
        let style = TextStyle::bold().with_font("Times New Roman").with_size_pt(12);
        assert!(style.bold);
        assert_eq!(style.size, Some(24));
        assert!(style.has_formatting());
        assert!(!TextStyle::default().has_formatting());

        assert_eq!(TextStyle::default().with_size_pt(u32::MAX).size, Some(u32::MAX));
        assert_eq!(
            Paragraph::new().with_spacing_after_pt(u32::MAX).spacing_after,
            Some(u32::MAX)
        );
    }

    #[test]
    fn test_paragraph() {
        let mut para = Paragraph::with_text("Hello, ")
            .with_style("Body Text")
            .with_alignment(TextAlignment::Justify)
            .with_spacing_after_pt(12);
        para.add_run(TextRun::styled("World", TextStyle::bold()));

        assert_eq!(para.plain_text(), "Hello, World");
        assert_eq!(para.spacing_after, Some(240));
        assert_eq!(para.alignment.ooxml_value(), "both");
        assert!(!para.is_empty());
        assert!(Paragraph::new().is_empty());
    }

    #[test]
    fn test_paragraph_serialization() {
        let para = Paragraph::with_text("Test");
        let json = serde_json::to_string(&para).unwrap();
        assert!(!json.contains("alignment"));
        assert!(!json.contains("style"));
    }
}
