//! In-memory document model.
//!
//! A document is an ordered sequence of heading and body blocks. The DOCX
//! reader produces these structures and the writer turns them back into
//! WordprocessingML.

mod document;
mod paragraph;
mod table;

pub use document::*;
pub use paragraph::*;
pub use table::*;
