//! Format detection for Office Open XML packages.
//!
//! Section replacement only works on Word documents; workbooks and
//! presentations share the same container format and are rejected here
//! with a clear error instead of a missing-part failure.

use crate::container::OoxmlContainer;
use crate::error::{Error, Result};

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

/// Macro-enabled documents and templates share the document structure.
const DOCX_VARIANT_CONTENT_TYPES: [&str; 3] = [
    "application/vnd.ms-word.document.macroEnabled.main+xml",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml",
    "application/vnd.ms-word.template.macroEnabledTemplate.main+xml",
];

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";

/// Detected Office document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Microsoft Word document (.docx)
    Docx,
    /// Microsoft Excel workbook (.xlsx)
    Xlsx,
    /// Microsoft PowerPoint presentation (.pptx)
    Pptx,
}

impl FormatType {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Docx => "docx",
            FormatType::Xlsx => "xlsx",
            FormatType::Pptx => "pptx",
        }
    }

    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            FormatType::Docx => "Word Document",
            FormatType::Xlsx => "Excel Workbook",
            FormatType::Pptx => "PowerPoint Presentation",
        }
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Detect the format of a loaded package.
///
/// Inspects `[Content_Types].xml` first and falls back to the folder
/// layout. Returns `None` when neither is conclusive.
pub fn detect_format(container: &OoxmlContainer) -> Option<FormatType> {
    if let Ok(content_types) = container.read_xml("[Content_Types].xml") {
        if content_types.contains(DOCX_CONTENT_TYPE)
            || DOCX_VARIANT_CONTENT_TYPES
                .iter()
                .any(|ct| content_types.contains(ct))
        {
            return Some(FormatType::Docx);
        } else if content_types.contains(XLSX_CONTENT_TYPE) {
            return Some(FormatType::Xlsx);
        } else if content_types.contains(PPTX_CONTENT_TYPE) {
            return Some(FormatType::Pptx);
        }
    }
    detect_by_folder_structure(container)
}

/// Fallback detection by checking folder structure.
fn detect_by_folder_structure(container: &OoxmlContainer) -> Option<FormatType> {
    let names = container.list_files();

    let has_word = names.iter().any(|n| n.starts_with("word/"));
    let has_xl = names.iter().any(|n| n.starts_with("xl/"));
    let has_ppt = names.iter().any(|n| n.starts_with("ppt/"));

    match (has_word, has_xl, has_ppt) {
        (true, false, false) => Some(FormatType::Docx),
        (false, true, false) => Some(FormatType::Xlsx),
        (false, false, true) => Some(FormatType::Pptx),
        _ => None,
    }
}

/// Reject packages that are positively identified as something other
/// than a Word document.
pub(crate) fn ensure_docx(container: &OoxmlContainer) -> Result<()> {
    match detect_format(container) {
        Some(FormatType::Docx) | None => Ok(()),
        Some(other) => Err(Error::UnsupportedFormat(format!(
            "{} (.{}), expected a Word document",
            other,
            other.extension()
        ))),
    }
}
