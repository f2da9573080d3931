//! Heading-driven section replacement.
//!
//! Each heading whose label matches a [`ContentMap`] key has everything up
//! to the next heading removed, and a single paragraph holding the mapped
//! text inserted in its place.

use crate::content::ContentMap;
use crate::model::{Block, Body, Document, Heading, Paragraph};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

static CHAPTER_PREFIX: OnceLock<Regex> = OnceLock::new();

fn chapter_prefix() -> &'static Regex {
    CHAPTER_PREFIX.get_or_init(|| Regex::new(r"(?i)^\s*CHAPTER\s+\d+").unwrap())
}

/// Normalized label of a heading: a leading "CHAPTER <n>" is dropped and
/// the rest is trimmed and upper-cased.
///
/// ```
/// use docsplice::replace::heading_label;
///
/// assert_eq!(heading_label("Chapter 2  Literature review"), "LITERATURE REVIEW");
/// assert_eq!(heading_label("CHAPTER 3"), "");
/// ```
pub fn heading_label(text: &str) -> String {
    chapter_prefix().replace(text, "").trim().to_uppercase()
}

/// Formatting of the paragraph inserted under a matched heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOptions {
    /// Paragraph style name (default "Body Text")
    pub body_style: Option<String>,
    /// Space after the paragraph in twentieths of a point (default 240, i.e. 12pt)
    pub spacing_after: Option<u32>,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            body_style: Some("Body Text".to_string()),
            spacing_after: Some(240),
        }
    }
}

impl ReplaceOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paragraph style; `None` leaves the paragraph unstyled.
    pub fn with_body_style(mut self, style: Option<String>) -> Self {
        self.body_style = style;
        self
    }

    /// Set the space after the paragraph, in points.
    pub fn with_spacing_after_pt(mut self, points: Option<u32>) -> Self {
        self.spacing_after = points.map(|pt| pt.saturating_mul(20));
        self
    }

    fn paragraph(&self, text: &str) -> Paragraph {
        let mut para = Paragraph::with_text(text);
        para.style = self.body_style.clone();
        para.spacing_after = self.spacing_after;
        para
    }
}

/// One replaced section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    /// Index of the heading block after replacement
    pub heading_index: usize,
    /// Heading text as it appears in the document
    pub heading: String,
    /// Normalized label that was matched
    pub label: String,
    /// Content map key that matched
    pub key: String,
    /// Number of blocks removed from the section
    pub removed: usize,
}

/// Result of a replacement pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaceSummary {
    /// Replaced sections in document order
    pub replacements: Vec<Replacement>,
    /// Non-blank headings that matched no key
    pub unmatched: Vec<String>,
}

impl ReplaceSummary {
    /// Number of sections replaced.
    pub fn replaced(&self) -> usize {
        self.replacements.len()
    }

    /// Total number of blocks removed.
    pub fn removed_blocks(&self) -> usize {
        self.replacements.iter().map(|r| r.removed).sum()
    }

    /// Content map keys that no heading matched, in map order.
    pub fn unused_keys<'a>(&self, map: &'a ContentMap) -> Vec<&'a str> {
        map.iter()
            .map(|(key, _)| key)
            .filter(|key| !self.replacements.iter().any(|r| r.key == *key))
            .collect()
    }
}

/// Replaces section bodies under matching headings.
///
/// # Example
///
/// ```
/// use docsplice::{Block, ContentMap, Document, HeadingLevel, SectionReplacer};
///
/// let mut doc = Document::from_blocks(vec![
///     Block::heading(HeadingLevel::H1, "CHAPTER 1 INTRODUCTION"),
///     Block::body("old text"),
/// ]);
/// let map: ContentMap = [("INTRODUCTION", "new text")].into_iter().collect();
///
/// let summary = SectionReplacer::new().replace(&mut doc, &map);
/// assert_eq!(summary.replaced(), 1);
/// assert_eq!(doc.get(1).map(Block::plain_text).as_deref(), Some("new text"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SectionReplacer {
    options: ReplaceOptions,
}

impl SectionReplacer {
    /// Create a replacer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a replacer with the given options.
    pub fn with_options(options: ReplaceOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReplaceOptions {
        &self.options
    }

    /// Run one replacement pass over `doc`.
    pub fn replace(&self, doc: &mut Document, content: &ContentMap) -> ReplaceSummary {
        let mut summary = ReplaceSummary::default();
        let mut i = 0;

        while i < doc.len() {
            let heading = match doc.get(i).and_then(boundary) {
                Some(heading) => heading,
                None => {
                    i += 1;
                    continue;
                }
            };

            let label = heading_label(heading.text());
            let (key, text) = match content.find_match(&label) {
                Some(found) => found,
                None => {
                    tracing::debug!(heading = heading.text(), "no content for heading");
                    summary.unmatched.push(heading.text().to_string());
                    i += 1;
                    continue;
                }
            };
            let heading_text = heading.text().to_string();

            let end = (i + 1..doc.len())
                .find(|&j| doc.get(j).and_then(boundary).is_some())
                .unwrap_or(doc.len());
            let removed = doc.remove_range(i + 1..end).len();
            doc.insert(i + 1, Body::paragraph(self.options.paragraph(text)));

            tracing::info!(heading = %heading_text, key, removed, "replaced section");
            summary.replacements.push(Replacement {
                heading_index: i,
                heading: heading_text,
                label,
                key: key.to_string(),
                removed,
            });

            // Skip the heading and the inserted paragraph
            i += 2;
        }

        summary
    }
}

/// A heading that ends a section. Blank headings do not.
fn boundary(block: &Block) -> Option<&Heading> {
    block.as_heading().filter(|heading| !heading.is_blank())
}

/// Replace section bodies using the default options.
pub fn replace_sections(doc: &mut Document, content: &ContentMap) -> ReplaceSummary {
    SectionReplacer::new().replace(doc, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BodyContent, HeadingLevel, Table};

    fn h(text: &str) -> Block {
        Block::heading(HeadingLevel::H1, text)
    }

    fn b(text: &str) -> Block {
        Block::body(text)
    }

    fn texts(doc: &Document) -> Vec<String> {
        doc.blocks().iter().map(Block::plain_text).collect()
    }

    fn map(pairs: &[(&str, &str)]) -> ContentMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_heading_label() {
        assert_eq!(heading_label("CHAPTER 1 INTRODUCTION"), "INTRODUCTION");
        assert_eq!(heading_label("chapter 12: Scope"), ": SCOPE");
        assert_eq!(heading_label("  Scope of the Project "), "SCOPE OF THE PROJECT");
        // Only a leading prefix is stripped
        assert_eq!(heading_label("NOTES ON CHAPTER 4"), "NOTES ON CHAPTER 4");
        assert_eq!(heading_label("Chapter Summary"), "CHAPTER SUMMARY");
    }

    #[test]
    fn test_intro_and_scope_scenario() {
        let mut doc = Document::from_blocks(vec![
            h("CHAPTER 1 INTRODUCTION"),
            b("old text A"),
            b("old text B"),
            h("SCOPE"),
            b("old scope text"),
        ]);
        let content = map(&[("INTRODUCTION", "NEW INTRO"), ("SCOPE", "NEW SCOPE")]);

        let summary = replace_sections(&mut doc, &content);

        assert_eq!(
            texts(&doc),
            vec!["CHAPTER 1 INTRODUCTION", "NEW INTRO", "SCOPE", "NEW SCOPE"]
        );
        assert!(doc.blocks()[0].is_heading());
        assert!(!doc.blocks()[1].is_heading());
        assert!(doc.blocks()[2].is_heading());
        assert_eq!(summary.replaced(), 2);
        assert_eq!(summary.removed_blocks(), 3);
        assert_eq!(summary.replacements[1].heading_index, 2);
        assert_eq!(summary.replacements[0].label, "INTRODUCTION");
    }

    #[test]
    fn test_no_match_leaves_document_unchanged() {
        let original = Document::from_blocks(vec![h("CONCLUSION"), b("x")]);
        let mut doc = original.clone();

        let summary = replace_sections(&mut doc, &map(&[("INTRODUCTION", "y")]));

        assert_eq!(doc, original);
        assert_eq!(summary.replaced(), 0);
        assert_eq!(summary.unmatched, vec!["CONCLUSION".to_string()]);
        assert_eq!(summary.unused_keys(&map(&[("INTRODUCTION", "y")])), vec!["INTRODUCTION"]);
    }

    #[test]
    fn test_overlapping_keys_follow_map_order() {
        let doc = Document::from_blocks(vec![h("SCOPE"), b("old")]);

        let mut first = doc.clone();
        replace_sections(&mut first, &map(&[("SCOPE", "short"), ("OUT OF SCOPE", "long")]));
        assert_eq!(texts(&first), vec!["SCOPE", "short"]);

        // "SCOPE" is inside "OUT OF SCOPE", so that key wins when it comes first
        let mut second = doc.clone();
        replace_sections(&mut second, &map(&[("OUT OF SCOPE", "long"), ("SCOPE", "short")]));
        assert_eq!(texts(&second), vec!["SCOPE", "long"]);
    }

    #[test]
    fn test_replaced_only_once() {
        let mut doc = Document::from_blocks(vec![h("PROJECT SCOPE"), b("old")]);
        let content = map(&[("SCOPE", "one"), ("PROJECT", "two"), ("PROJECT SCOPE", "three")]);

        let summary = replace_sections(&mut doc, &content);

        assert_eq!(texts(&doc), vec!["PROJECT SCOPE", "one"]);
        assert_eq!(summary.replaced(), 1);
    }

    #[test]
    fn test_inserted_text_is_not_rescanned() {
        // The inserted paragraph looks like a label but is never a heading
        let mut doc = Document::from_blocks(vec![h("SCOPE"), b("old"), h("SUMMARY")]);
        replace_sections(&mut doc, &map(&[("SCOPE", "SUMMARY")]));
        assert_eq!(texts(&doc), vec!["SCOPE", "SUMMARY", "SUMMARY"]);
        assert!(doc.blocks()[2].is_heading());
    }

    #[test]
    fn test_blank_heading_is_not_a_boundary() {
        let mut doc = Document::from_blocks(vec![
            h("INTRODUCTION"),
            b("a"),
            h("   "),
            b("b"),
            h("SCOPE"),
            b("c"),
        ]);

        let summary = replace_sections(&mut doc, &map(&[("INTRODUCTION", "new")]));

        assert_eq!(texts(&doc), vec!["INTRODUCTION", "new", "SCOPE", "c"]);
        assert_eq!(summary.replacements[0].removed, 3);
    }

    #[test]
    fn test_blank_heading_is_never_matched() {
        let original = Document::from_blocks(vec![h(""), b("kept")]);
        let mut doc = original.clone();
        replace_sections(&mut doc, &map(&[("SCOPE", "x")]));
        assert_eq!(doc, original);
    }

    #[test]
    fn test_bare_chapter_heading_matches_first_key() {
        let mut doc = Document::from_blocks(vec![h("CHAPTER 3"), b("old")]);
        let summary = replace_sections(&mut doc, &map(&[("RESULTS", "r"), ("SCOPE", "s")]));

        assert_eq!(texts(&doc), vec!["CHAPTER 3", "r"]);
        assert_eq!(summary.replacements[0].label, "");
        assert_eq!(summary.replacements[0].key, "RESULTS");
    }

    #[test]
    fn test_empty_replacement_inserts_empty_block() {
        let mut doc = Document::from_blocks(vec![h("SCOPE"), b("a"), b("b")]);
        replace_sections(&mut doc, &map(&[("SCOPE", "")]));

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.blocks()[1].plain_text(), "");
        assert!(!doc.blocks()[1].is_heading());
    }

    #[test]
    fn test_heading_at_end_gets_body() {
        let mut doc = Document::from_blocks(vec![b("preface"), h("SCOPE")]);
        let summary = replace_sections(&mut doc, &map(&[("SCOPE", "s")]));

        assert_eq!(texts(&doc), vec!["preface", "SCOPE", "s"]);
        assert_eq!(summary.replacements[0].removed, 0);
    }

    #[test]
    fn test_tables_and_breaks_are_removed() {
        let mut doc = Document::from_blocks(vec![
            h("RESULTS"),
            Table::from_rows([["a", "b"]]).into(),
            Body::page_break().into(),
            b("text"),
            h("SCOPE"),
        ]);
        replace_sections(&mut doc, &map(&[("RESULTS", "new")]));
        assert_eq!(texts(&doc), vec!["RESULTS", "new", "SCOPE"]);
    }

    #[test]
    fn test_multiline_text_is_one_block() {
        let mut doc = Document::from_blocks(vec![h("SCOPE")]);
        replace_sections(&mut doc, &map(&[("SCOPE", "line 1\nline 2\n\nline 4")]));

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.blocks()[1].plain_text(), "line 1\nline 2\n\nline 4");
    }

    #[test]
    fn test_inserted_paragraph_formatting() {
        let mut doc = Document::from_blocks(vec![h("SCOPE")]);
        replace_sections(&mut doc, &map(&[("SCOPE", "s")]));

        let body = doc.blocks()[1].as_body().unwrap();
        match body.content() {
            BodyContent::Paragraph(para) => {
                assert_eq!(para.style.as_deref(), Some("Body Text"));
                assert_eq!(para.spacing_after, Some(240));
            }
            other => panic!("expected paragraph, got {:?}", other),
        }

        let options = ReplaceOptions::new()
            .with_body_style(Some("Normal".to_string()))
            .with_spacing_after_pt(None);
        let replacer = SectionReplacer::with_options(options);
        assert_eq!(replacer.options().body_style.as_deref(), Some("Normal"));
        assert_eq!(SectionReplacer::new().options(), &ReplaceOptions::default());

        let mut doc = Document::from_blocks(vec![h("SCOPE")]);
        replacer.replace(&mut doc, &map(&[("SCOPE", "s")]));
        match doc.blocks()[1].as_body().unwrap().content() {
            BodyContent::Paragraph(para) => {
                assert_eq!(para.style.as_deref(), Some("Normal"));
                assert_eq!(para.spacing_after, None);
            }
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_spacing_in_points_saturates() {
        let options = ReplaceOptions::new().with_spacing_after_pt(Some(u32::MAX));
        assert_eq!(options.spacing_after, Some(u32::MAX));
        assert_eq!(
            ReplaceOptions::new().with_spacing_after_pt(Some(6)).spacing_after,
            Some(120)
        );
    }

    #[test]
    fn test_headings_preserved() {
        let mut doc = Document::from_blocks(vec![
            Block::heading(HeadingLevel::H1, "CHAPTER 1 INTRODUCTION"),
            b("x"),
            Block::heading(HeadingLevel::H2, "Objectives"),
            b("y"),
            Block::heading(HeadingLevel::H2, "Methodology"),
        ]);
        let before: Vec<_> = doc.headings().cloned().collect();

        replace_sections(&mut doc, &map(&[("OBJECTIVES", "o"), ("INTRODUCTION", "i")]));

        let after: Vec<_> = doc.headings().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_empty_map_and_document() {
        let mut empty = Document::new();
        assert_eq!(replace_sections(&mut empty, &map(&[("A", "b")])).replaced(), 0);

        let mut doc = Document::from_blocks(vec![h("SCOPE"), b("x")]);
        replace_sections(&mut doc, &ContentMap::new());
        assert_eq!(texts(&doc), vec!["SCOPE", "x"]);
    }
}
