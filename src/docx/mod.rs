//! DOCX (Word) document editing.
//!
//! This module loads Word documents in the Office Open XML (.docx) format
//! into an editable block sequence and writes them back.

mod layout;
mod package;
mod reader;
mod styles;
mod writer;

pub use layout::{PageBorder, PageLayout, TWIPS_PER_INCH};
pub use package::DocxDocument;
pub use reader::ParseOptions;
pub use styles::{Style, StyleMap, StyleType};
