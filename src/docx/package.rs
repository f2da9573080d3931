//! An editable DOCX package.

use super::layout::PageLayout;
use super::reader::{read_body, ParseOptions};
use super::styles::StyleMap;
use super::writer::write_blocks;
use crate::container::OoxmlContainer;
use crate::detect::{ensure_docx, is_zip_file};
use crate::error::{Error, Result};
use crate::model::Document;
use std::path::Path;

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// A DOCX package opened for editing.
///
/// The body of `word/document.xml` is exposed as a [`Document`]; every
/// other part of the package is carried through unchanged on save.
///
/// # Example
///
/// ```no_run
/// use docsplice::docx::DocxDocument;
///
/// let mut docx = DocxDocument::open("report.docx")?;
/// docx.document_mut().add_paragraph("Appendix follows.");
/// docx.save("report-edited.docx")?;
/// # Ok::<(), docsplice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocxDocument {
    container: OoxmlContainer,
    styles: StyleMap,
    head: String,
    tail: String,
    document: Document,
}

impl DocxDocument {
    /// Open a DOCX file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &ParseOptions::default())
    }

    /// Open a DOCX file with custom parse options.
    pub fn open_with(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening document");
        Self::from_bytes_with(std::fs::read(path)?, options)
    }

    /// Load a DOCX package from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_bytes_with(data, &ParseOptions::default())
    }

    /// Load a DOCX package from bytes with custom parse options.
    pub fn from_bytes_with(data: Vec<u8>, options: &ParseOptions) -> Result<Self> {
        if !is_zip_file(&data) {
            return Err(Error::UnknownFormat);
        }
        Self::from_container(OoxmlContainer::from_bytes(data)?, options)
    }

    fn from_container(container: OoxmlContainer, options: &ParseOptions) -> Result<Self> {
        ensure_docx(&container)?;

        let styles = match container.read_xml(STYLES_PART) {
            Ok(xml) => StyleMap::parse(&xml)?,
            Err(_) => {
                tracing::debug!("package has no styles part");
                StyleMap::default()
            }
        };

        let xml = container.read_xml(DOCUMENT_PART)?;
        let parts = read_body(&xml, &styles, options)?;

        Ok(Self {
            container,
            styles,
            head: parts.head,
            tail: parts.tail,
            document: parts.document,
        })
    }

    /// Create a new, empty package with the built-in styles.
    pub fn blank(layout: &PageLayout) -> Self {
        let mut container = OoxmlContainer::new();
        container.set("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec());
        container.set("_rels/.rels", PACKAGE_RELS.as_bytes().to_vec());
        container.set("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes().to_vec());
        container.set(STYLES_PART, blank_styles().into_bytes());

        let head = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}" xmlns:r="{}"><w:body>"#,
            W_NS, R_NS
        );
        let tail = format!("{}</w:body></w:document>", layout.section_properties());
        // Placeholder; the real part is produced on save
        container.set(DOCUMENT_PART, Vec::new());

        // The built-in stylesheet is static and known to parse
        let styles = StyleMap::parse(&blank_styles()).unwrap_or_default();

        Self {
            container,
            styles,
            head,
            tail,
            document: Document::new(),
        }
    }

    /// The document body.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The document body, for editing.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Styles defined by the package.
    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// Consume the package, keeping only the document body.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Render `word/document.xml` from the current blocks.
    pub fn document_xml(&self) -> String {
        let body = write_blocks(self.document.blocks(), &self.styles);
        let mut xml = String::with_capacity(self.head.len() + body.len() + self.tail.len());
        xml.push_str(&self.head);
        xml.push_str(&body);
        xml.push_str(&self.tail);
        xml
    }

    /// Serialize the package into DOCX bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let xml = self.document_xml();
        self.container.to_bytes(&[(DOCUMENT_PART, xml.as_bytes())])
    }

    /// Save the package to a file.
    ///
    /// The package is fully serialized before the file is created.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        tracing::debug!(path = %path.display(), blocks = self.document.len(), "saved document");
        Ok(())
    }
}

/// styles.xml for new packages.
fn blank_styles() -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>"#,
        W_NS
    );
    xml.push_str(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
    );
    xml.push_str(
        r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="240"/><w:jc w:val="center"/></w:pPr><w:rPr><w:b/><w:sz w:val="56"/></w:rPr></w:style>"#,
    );
    // Word's built-in heading sizes, in half-points
    for (level, size) in (1u8..=6).zip([32, 26, 24, 22, 22, 22]) {
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{0}"><w:name w:val="heading {0}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="{1}"/></w:pPr><w:rPr><w:b/><w:sz w:val="{2}"/></w:rPr></w:style>"#,
            level,
            level - 1,
            size
        ));
    }
    xml.push_str(
        r#"<w:style w:type="paragraph" w:styleId="BodyText"><w:name w:val="Body Text"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="120"/></w:pPr></w:style>"#,
    );
    xml.push_str(
        r#"<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:style>"#,
    );
    xml.push_str(
        r#"<w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/></w:tblBorders></w:tblPr></w:style>"#,
    );
    xml.push_str("</w:styles>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::{PageBorder, StyleType};
    use crate::model::{Block, HeadingLevel};

    #[test]
    fn test_blank_styles() {
        let docx = DocxDocument::blank(&PageLayout::default());
        let styles = docx.styles();
        for name in ["Normal", "Title", "Heading 1", "Heading 6", "Body Text", "List Bullet"] {
            assert!(
                styles.id_for_name(name, StyleType::Paragraph).is_some(),
                "missing style {}",
                name
            );
        }
        assert_eq!(styles.id_for_name("Table Grid", StyleType::Table), Some("TableGrid"));
        assert_eq!(styles.get_heading_level("Heading3"), Some(HeadingLevel::H3));
        assert!(docx.document().is_empty());
    }

    #[test]
    fn test_blank_roundtrip() {
        let layout = PageLayout::letter().with_border(PageBorder::colored("8B0000"));
        let mut docx = DocxDocument::blank(&layout);
        docx.document_mut()
            .add_heading(HeadingLevel::H1, "CHAPTER 1 INTRODUCTION");
        docx.document_mut().add_paragraph("Body & more");

        let bytes = docx.to_bytes().unwrap();
        let reopened = DocxDocument::from_bytes(bytes).unwrap();

        let blocks = reopened.document().blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0].as_heading().map(|h| h.level()),
            Some(HeadingLevel::H1)
        );
        assert_eq!(blocks[1].plain_text(), "Body & more");
        assert!(reopened.document_xml().contains(r#"w:color="8B0000""#));
        assert!(matches!(blocks[0], Block::Heading(_)));
    }

    #[test]
    fn test_missing_document_part() {
        let mut container = OoxmlContainer::new();
        container.set("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec());
        let bytes = container.to_bytes(&[]).unwrap();

        let err = DocxDocument::from_bytes(bytes).unwrap_err();
        assert!(matches!(err, Error::MissingComponent(_)));
    }

    #[test]
    fn test_not_a_zip() {
        let err = DocxDocument::from_bytes(b"plain text".to_vec()).unwrap_err();
        assert!(matches!(err, Error::UnknownFormat));

        // ZIP magic but no archive behind it
        let err = DocxDocument::from_bytes(b"PK\x03\x04garbage".to_vec()).unwrap_err();
        assert!(matches!(err, Error::ZipArchive(_)));
    }
}
