//! # docsplice
//!
//! Heading-driven section replacement for Word (.docx) documents.
//!
//! A document is loaded as an ordered sequence of heading and body blocks.
//! Each heading whose label matches an entry of a [`ContentMap`] has its
//! section body swapped for the mapped text; everything else in the file
//! is written back untouched.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsplice::{replace_file, ContentMap};
//!
//! let content = ContentMap::load("content.toml")?;
//! let summary = replace_file("report.docx", &content, "report-updated.docx")?;
//! println!("Replaced {} sections", summary.replaced());
//! # Ok::<(), docsplice::Error>(())
//! ```
//!
//! ## Working with the block sequence
//!
//! ```no_run
//! use docsplice::docx::DocxDocument;
//! use docsplice::{ContentMap, SectionReplacer, ReplaceOptions};
//!
//! let mut docx = DocxDocument::open("report.docx")?;
//! for heading in docx.document().headings() {
//!     println!("{:?} {}", heading.level(), heading.text());
//! }
//!
//! let content: ContentMap = [("SCOPE", "The system covers...")].into_iter().collect();
//! let replacer = SectionReplacer::with_options(ReplaceOptions::new().with_spacing_after_pt(Some(6)));
//! replacer.replace(docx.document_mut(), &content);
//! docx.save("report-updated.docx")?;
//! # Ok::<(), docsplice::Error>(())
//! ```
//!
//! ## Building a document from scratch
//!
//! ```no_run
//! use docsplice::docx::{DocxDocument, PageBorder, PageLayout};
//! use docsplice::{HeadingLevel, Table};
//!
//! let layout = PageLayout::letter().with_border(PageBorder::colored("8B0000"));
//! let mut docx = DocxDocument::blank(&layout);
//! let doc = docx.document_mut();
//! doc.add_heading(HeadingLevel::H1, "Cost Estimation");
//! doc.add_paragraph("Effort is estimated with the basic model.");
//! doc.push(Table::from_rows([["Parameter", "Value"], ["KLOC", "12.4"]]));
//! docx.save("estimate.docx")?;
//! # Ok::<(), docsplice::Error>(())
//! ```

pub mod container;
pub mod content;
pub mod detect;
pub mod docx;
pub mod error;
pub mod inspect;
pub mod model;
pub mod replace;

// Re-exports
pub use container::OoxmlContainer;
pub use content::ContentMap;
pub use detect::{detect_format, FormatType};
pub use docx::{DocxDocument, PageBorder, PageLayout, ParseOptions, StyleMap};
pub use error::{Error, Result};
pub use inspect::{outline, Outline, OutlineEntry};
pub use model::{
    Block, Body, BodyContent, Cell, Document, Heading, HeadingLevel, Paragraph, Row, Table,
    TextAlignment, TextRun, TextStyle,
};
pub use replace::{
    heading_label, replace_sections, ReplaceOptions, ReplaceSummary, Replacement,
    SectionReplacer,
};

use std::path::Path;

/// Open a DOCX file for editing.
///
/// # Example
///
/// ```no_run
/// let docx = docsplice::open("report.docx")?;
/// println!("Blocks: {}", docx.document().len());
/// # Ok::<(), docsplice::Error>(())
/// ```
pub fn open(path: impl AsRef<Path>) -> Result<DocxDocument> {
    DocxDocument::open(path)
}

/// Replace sections of a DOCX file and save the result to `output`.
///
/// Nothing is written if loading or serializing fails.
pub fn replace_file(
    input: impl AsRef<Path>,
    content: &ContentMap,
    output: impl AsRef<Path>,
) -> Result<ReplaceSummary> {
    replace_file_with(input, content, output, &ReplaceOptions::default())
}

/// Replace sections of a DOCX file with custom options.
pub fn replace_file_with(
    input: impl AsRef<Path>,
    content: &ContentMap,
    output: impl AsRef<Path>,
    options: &ReplaceOptions,
) -> Result<ReplaceSummary> {
    let mut docx = DocxDocument::open(input)?;
    let summary =
        SectionReplacer::with_options(options.clone()).replace(docx.document_mut(), content);
    docx.save(output)?;
    Ok(summary)
}

/// Default output path for an edited document: `<stem>-updated.docx`
/// next to the input.
///
/// # Example
///
/// ```
/// use std::path::Path;
///
/// let out = docsplice::updated_path(Path::new("reports/IVARS-REPORT.docx"));
/// assert_eq!(out, Path::new("reports/IVARS-REPORT-updated.docx"));
/// ```
pub fn updated_path(input: &Path) -> std::path::PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    input.with_file_name(format!("{}-updated.docx", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updated_path() {
        assert_eq!(
            updated_path(Path::new("report.docx")),
            Path::new("report-updated.docx")
        );
        assert_eq!(
            updated_path(Path::new("/tmp/a.b.docx")),
            Path::new("/tmp/a.b-updated.docx")
        );
    }

    #[test]
    fn test_replace_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.docx");
        let output = updated_path(&input);

        let mut docx = DocxDocument::blank(&PageLayout::default());
        docx.document_mut().add_heading(HeadingLevel::H1, "CHAPTER 1 INTRODUCTION");
        docx.document_mut().add_paragraph("old");
        docx.save(&input).unwrap();

        let content: ContentMap = [("INTRODUCTION", "new")].into_iter().collect();
        let summary = replace_file(&input, &content, &output).unwrap();
        assert_eq!(summary.replaced(), 1);

        let reopened = open(&output).unwrap();
        assert_eq!(reopened.document().plain_text(), "CHAPTER 1 INTRODUCTION\nnew");
        // Input is left alone
        assert_eq!(open(&input).unwrap().document().plain_text(), "CHAPTER 1 INTRODUCTION\nold");
    }

    #[test]
    fn test_replace_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.docx");
        let result = replace_file(dir.path().join("missing.docx"), &ContentMap::new(), &output);

        assert!(matches!(result, Err(Error::Io(_))));
        assert!(!output.exists());
    }
}
