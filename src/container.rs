//! ZIP container abstraction for OOXML packages.
//!
//! The whole package is held in memory: every part is read on open and
//! written back, in its original order, on save. Only parts that the caller
//! overrides change.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Fix XML encoding declaration from UTF-16 to UTF-8.
///
/// When we decode UTF-16 XML to a Rust String (UTF-8), the XML declaration
/// still says encoding="UTF-16". Both quick-xml and Word would misread the
/// part once it is written back as UTF-8.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if content.starts_with("<?xml") {
        if let Some(end_decl) = content.find("?>") {
            let decl = &content[..end_decl + 2];
            let rest = &content[end_decl + 2..];

            let fixed_decl = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");

            return format!("{}{}", fixed_decl, rest);
        }
    }
    content.to_string()
}

/// Decode XML bytes handling different encodings (UTF-8, UTF-16 LE/BE).
///
/// OOXML parts are normally UTF-8, but some producers write UTF-16.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if bytes.len() >= 3 && bytes[0] == 0xEF && bytes[1] == 0xBB && bytes[2] == 0xBF {
        return String::from_utf8(bytes[3..].to_vec())
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)));
    }

    if bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] == 0xFE {
        let content = decode_utf16_le(&bytes[2..])?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let content = decode_utf16_be(&bytes[2..])?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => Ok(s),
        Err(_) => {
            // UTF-16 LE has null bytes in odd positions for ASCII
            if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
                decode_utf16_le(bytes).map(|s| fix_xml_encoding_declaration(&s))
            } else if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
                decode_utf16_be(bytes).map(|s| fix_xml_encoding_declaration(&s))
            } else {
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

fn decode_utf16_le(bytes: &[u8]) -> Result<String> {
    let len = bytes.len() & !1;

    let u16_iter = (0..len)
        .step_by(2)
        .map(|i| u16::from_le_bytes([bytes[i], bytes[i + 1]]));

    char::decode_utf16(u16_iter)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn decode_utf16_be(bytes: &[u8]) -> Result<String> {
    let len = bytes.len() & !1;

    let u16_iter = (0..len)
        .step_by(2)
        .map(|i| u16::from_be_bytes([bytes[i], bytes[i + 1]]));

    char::decode_utf16(u16_iter)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// OOXML container over an in-memory ZIP archive.
#[derive(Clone, Default)]
pub struct OoxmlContainer {
    /// Parts in archive order
    parts: Vec<(String, Vec<u8>)>,
}

impl OoxmlContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an OOXML container from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docsplice::container::OoxmlContainer;
    ///
    /// let container = OoxmlContainer::open("report.docx")?;
    /// assert!(container.exists("word/document.xml"));
    /// # Ok::<(), docsplice::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Create an OOXML container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Create an OOXML container from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            parts.push((name, data));
        }

        tracing::debug!(parts = parts.len(), "loaded OOXML package");
        Ok(Self { parts })
    }

    /// Read an XML part as a string, decoding UTF-8 or UTF-16.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self
            .get(path)
            .ok_or_else(|| Error::MissingComponent(path.to_string()))?;
        decode_xml_bytes(bytes)
    }

    /// Raw bytes of a part.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|(name, _)| name == path)
            .map(|(_, data)| data.as_slice())
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        self.parts.iter().any(|(name, _)| name == path)
    }

    /// List all parts in archive order.
    pub fn list_files(&self) -> Vec<String> {
        self.parts.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Set a part's contents, keeping its position if it already exists.
    pub fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        let path = path.into();
        match self.parts.iter_mut().find(|(name, _)| *name == path) {
            Some((_, data)) => *data = contents,
            None => self.parts.push((path, contents)),
        }
    }

    /// Write the package to any writer.
    ///
    /// `overrides` replaces the contents of the named parts in the output
    /// without touching the container itself.
    pub fn write_to<W: Write + Seek>(&self, writer: W, overrides: &[(&str, &[u8])]) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, data) in &self.parts {
            let contents = overrides
                .iter()
                .find(|(path, _)| *path == name.as_str())
                .map(|(_, data)| *data)
                .unwrap_or(data.as_slice());
            zip.start_file(name.as_str(), options)?;
            zip.write_all(contents)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Serialize the package into a byte vector.
    pub fn to_bytes(&self, overrides: &[(&str, &[u8])]) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.write_to(&mut buffer, overrides)?;
        Ok(buffer.into_inner())
    }
}

impl std::fmt::Debug for OoxmlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OoxmlContainer")
            .field("files", &self.parts.len())
            .finish()
    }
}
