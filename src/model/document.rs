//! Document model structures.
//!
//! A [`Document`] is an ordered, index-addressable sequence of [`Block`]s.
//! Blocks loaded from a file remember their original markup so that blocks
//! nobody touched are written back unchanged.

use super::{HeadingLevel, Paragraph, Table, TextStyle};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A heading block: a section boundary with a level and text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    level: HeadingLevel,
    text: String,
    #[serde(default, skip_serializing_if = "is_default_style")]
    style: TextStyle,
    #[serde(skip)]
    style_name: Option<String>,
    #[serde(skip)]
    source: Option<String>,
}

fn is_default_style(style: &TextStyle) -> bool {
    *style == TextStyle::default()
}

impl Heading {
    /// Create a heading.
    pub fn new(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            style: TextStyle::default(),
            style_name: None,
            source: None,
        }
    }

    /// Create a heading whose run carries explicit formatting.
    pub fn styled(level: HeadingLevel, text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            style,
            ..Self::new(level, text)
        }
    }

    pub(crate) fn loaded(
        level: HeadingLevel,
        text: String,
        style_name: Option<String>,
        source: String,
    ) -> Self {
        Self {
            style_name,
            source: Some(source),
            ..Self::new(level, text)
        }
    }

    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Run formatting used when the heading is written out.
    pub fn run_style(&self) -> &TextStyle {
        &self.style
    }

    /// Paragraph style name, e.g. "heading 1" as stored in the file or
    /// "Heading 1" for headings created in memory.
    pub fn style_name(&self) -> String {
        self.style_name
            .clone()
            .unwrap_or_else(|| self.level.style_name())
    }

    /// Original markup if the heading was loaded from a file.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// A heading is blank when its text is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Content of a body block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyContent {
    /// A paragraph of text
    Paragraph(Paragraph),
    /// A table
    Table(Table),
    /// A page break
    PageBreak,
    /// Any other body-level element (content control, custom XML, ...)
    Other {
        /// Element local name, e.g. "sdt"
        element: String,
        /// Text found inside the element
        text: String,
    },
}

/// A body block: ordinary content between headings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    content: BodyContent,
    #[serde(skip)]
    source: Option<String>,
}

impl Body {
    /// A body block holding a formatted paragraph.
    pub fn paragraph(paragraph: Paragraph) -> Self {
        Self {
            content: BodyContent::Paragraph(paragraph),
            source: None,
        }
    }

    /// A body block holding one plain paragraph.
    pub fn text(text: impl Into<String>) -> Self {
        Self::paragraph(Paragraph::with_text(text))
    }

    /// A body block holding a table.
    pub fn table(table: Table) -> Self {
        Self {
            content: BodyContent::Table(table),
            source: None,
        }
    }

    /// A page break.
    pub fn page_break() -> Self {
        Self {
            content: BodyContent::PageBreak,
            source: None,
        }
    }

    pub(crate) fn loaded(content: BodyContent, source: String) -> Self {
        Self {
            content,
            source: Some(source),
        }
    }

    pub fn content(&self) -> &BodyContent {
        &self.content
    }

    /// Original markup if the block was loaded from a file.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Plain text of the block.
    pub fn plain_text(&self) -> String {
        match &self.content {
            BodyContent::Paragraph(para) => para.plain_text(),
            BodyContent::Table(table) => table.plain_text(),
            BodyContent::PageBreak => String::new(),
            BodyContent::Other { text, .. } => text.clone(),
        }
    }
}

/// A block-level element of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    Heading(Heading),
    Body(Body),
}

impl Block {
    /// Shorthand for a heading block.
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Block::Heading(Heading::new(level, text))
    }

    /// Shorthand for a plain body paragraph.
    pub fn body(text: impl Into<String>) -> Self {
        Block::Body(Body::text(text))
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading(_))
    }

    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            Block::Heading(heading) => Some(heading),
            Block::Body(_) => None,
        }
    }

    pub fn as_body(&self) -> Option<&Body> {
        match self {
            Block::Body(body) => Some(body),
            Block::Heading(_) => None,
        }
    }

    /// Plain text of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading(heading) => heading.text().to_string(),
            Block::Body(body) => body.plain_text(),
        }
    }

    /// Original markup if the block was loaded from a file.
    pub fn source(&self) -> Option<&str> {
        match self {
            Block::Heading(heading) => heading.source(),
            Block::Body(body) => body.source(),
        }
    }
}

impl From<Heading> for Block {
    fn from(heading: Heading) -> Self {
        Block::Heading(heading)
    }
}

impl From<Body> for Block {
    fn from(body: Body) -> Self {
        Block::Body(body)
    }
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Body(Body::paragraph(paragraph))
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Body(Body::table(table))
    }
}

/// An ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from blocks.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Append a block.
    pub fn push(&mut self, block: impl Into<Block>) {
        self.blocks.push(block.into());
    }

    /// Append a heading.
    pub fn add_heading(&mut self, level: HeadingLevel, text: impl Into<String>) {
        self.push(Heading::new(level, text));
    }

    /// Append a plain paragraph.
    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.push(Body::text(text));
    }

    /// Append an empty paragraph, the usual spacer line.
    pub fn add_blank_line(&mut self) {
        self.push(Paragraph::new());
    }

    /// Append a page break.
    pub fn add_page_break(&mut self) {
        self.push(Body::page_break());
    }

    /// Insert a block at `index`, shifting later blocks.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, block: impl Into<Block>) {
        self.blocks.insert(index, block.into());
    }

    /// Remove and return the block at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Block {
        self.blocks.remove(index)
    }

    /// Remove and return a contiguous range of blocks.
    pub fn remove_range(&mut self, range: Range<usize>) -> Vec<Block> {
        self.blocks.drain(range).collect()
    }

    /// Iterate over heading blocks.
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.blocks.iter().filter_map(Block::as_heading)
    }

    /// Extract all text content as a single string.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl FromIterator<Block> for Document {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self::from_blocks(iter.into_iter().collect())
    }
}
