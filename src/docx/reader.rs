//! Splitting `word/document.xml` into blocks.
//!
//! The body is cut into its top-level elements by byte offset. Each element
//! keeps its exact source text; a light second pass extracts what the model
//! needs (style, heading level, plain text). Everything before the first
//! block is the head, and the final `w:sectPr` plus everything after it is
//! the tail.

use super::styles::{val_attr, StyleMap};
use crate::error::{Error, Result};
use crate::model::{
    Block, Body, BodyContent, Cell, Document, Heading, Paragraph, Row, Table, TextRun,
};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Options controlling how a document body is read.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Deepest heading level treated as a section boundary (1-6).
    /// Paragraphs with deeper heading styles load as body blocks.
    pub max_heading_level: u8,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 4,
        }
    }
}

impl ParseOptions {
    /// Create default parse options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deepest heading level (clamped to 1-6).
    pub fn with_max_heading_level(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }
}

/// `document.xml` split into head, blocks and tail.
#[derive(Debug, Clone)]
pub(crate) struct BodyParts {
    pub head: String,
    pub document: Document,
    pub tail: String,
}

/// Split a `document.xml` string into its body blocks.
pub(crate) fn read_body(xml: &str, styles: &StyleMap, options: &ParseOptions) -> Result<BodyParts> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    let mut head: Option<String> = None;
    let mut tail_start: Option<usize> = None;
    let mut tail: Option<String> = None;
    let mut open_block: Option<(usize, String)> = None;
    let mut blocks = Vec::new();

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event()?;
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => {
                depth += 1;
                let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                match body_depth {
                    None if local == "body" => {
                        body_depth = Some(depth);
                        head = Some(xml[..after].to_string());
                    }
                    Some(b) if depth == b + 1 && tail_start.is_none() => {
                        if local == "sectPr" {
                            tail_start = Some(before);
                        } else {
                            open_block = Some((before, local));
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                match body_depth {
                    None if local == "body" => {
                        // `<w:body/>`: open it up so blocks can be added
                        head = Some(format!("{}<{}>", &xml[..before], qualified(&e)));
                        tail = Some(format!("</{}>{}", qualified(&e), &xml[after..]));
                    }
                    Some(b) if depth == b && tail_start.is_none() => {
                        if local == "sectPr" {
                            tail_start = Some(before);
                        } else {
                            blocks.push(classify(&local, &xml[before..after], styles, options)?);
                        }
                    }
                    _ => {}
                }
            }
            Event::End(_) => {
                if let Some(b) = body_depth {
                    if depth == b + 1 {
                        if let Some((start, local)) = open_block.take() {
                            blocks.push(classify(&local, &xml[start..after], styles, options)?);
                        }
                    } else if depth == b && tail.is_none() {
                        tail = Some(xml[tail_start.unwrap_or(before)..].to_string());
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let head = head.ok_or_else(|| Error::InvalidData("document has no w:body".to_string()))?;
    let tail = tail.ok_or_else(|| Error::InvalidData("unterminated w:body".to_string()))?;

    tracing::debug!(blocks = blocks.len(), "split document body");
    Ok(BodyParts {
        head,
        document: Document::from_blocks(blocks),
        tail,
    })
}

fn qualified(e: &quick_xml::events::BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// Turn one top-level body element into a block.
fn classify(local: &str, source: &str, styles: &StyleMap, options: &ParseOptions) -> Result<Block> {
    let block = match local {
        "p" => {
            let info = scan_paragraph(source)?;
            let level = info
                .style_id
                .as_deref()
                .and_then(|id| styles.get_heading_level(id))
                .filter(|level| level.level() <= options.max_heading_level);
            let style_name = info.style_id.as_deref().map(|id| styles.display_name(id));

            match level {
                Some(level) => Block::Heading(Heading::loaded(
                    level,
                    info.text,
                    style_name,
                    source.to_string(),
                )),
                None if info.page_break_only => {
                    Block::Body(Body::loaded(BodyContent::PageBreak, source.to_string()))
                }
                None => {
                    let mut para = Paragraph::with_text(info.text);
                    para.style = style_name;
                    Block::Body(Body::loaded(BodyContent::Paragraph(para), source.to_string()))
                }
            }
        }
        "tbl" => {
            let table = scan_table(source, styles)?;
            Block::Body(Body::loaded(BodyContent::Table(table), source.to_string()))
        }
        other => Block::Body(Body::loaded(
            BodyContent::Other {
                element: other.to_string(),
                text: scan_text(source)?,
            },
            source.to_string(),
        )),
    };
    Ok(block)
}

/// What the model needs from a paragraph.
#[derive(Debug, Default)]
struct ParagraphInfo {
    style_id: Option<String>,
    text: String,
    page_break_only: bool,
}

/// Elements whose text is not part of the paragraph's own text.
fn is_embedded(local: &[u8]) -> bool {
    matches!(local, b"drawing" | b"pict" | b"AlternateContent" | b"object")
}

/// Read style and visible text of a single `w:p`.
///
/// Text comes from `w:t` inside runs (hyperlinks included); `w:tab` reads as
/// `\t`, `w:br`/`w:cr` as `\n`. Field codes, deleted text and content of
/// drawings and text boxes are skipped.
fn scan_paragraph(xml: &str) -> Result<ParagraphInfo> {
    let mut info = ParagraphInfo::default();
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut depth = 0usize;
    let mut in_ppr = false;
    let mut run_depth = 0usize;
    let mut in_text = false;
    let mut embedded = 0usize;
    let mut page_breaks = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                let local = e.local_name();
                if embedded > 0 || is_embedded(local.as_ref()) {
                    embedded += 1;
                    continue;
                }
                match local.as_ref() {
                    b"pPr" if depth == 2 => in_ppr = true,
                    b"r" => run_depth += 1,
                    b"t" if run_depth > 0 => in_text = true,
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if embedded > 0 {
                    continue;
                }
                match e.local_name().as_ref() {
                    b"pStyle" if in_ppr && info.style_id.is_none() => {
                        info.style_id = val_attr(&e)?;
                    }
                    b"tab" if run_depth > 0 => info.text.push('\t'),
                    b"br" | b"cr" if run_depth > 0 => {
                        let is_page = e.attributes().flatten().any(|a| {
                            a.key.local_name().as_ref() == b"type" && a.value.as_ref() == b"page"
                        });
                        if is_page {
                            page_breaks += 1;
                        } else {
                            info.text.push('\n');
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(t) => {
                if in_text && embedded == 0 {
                    info.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(t) => {
                if in_text && embedded == 0 {
                    info.text.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if embedded > 0 {
                    embedded -= 1;
                    continue;
                }
                match e.local_name().as_ref() {
                    b"pPr" => in_ppr = false,
                    b"r" => run_depth = run_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    info.page_break_only = page_breaks > 0 && info.text.trim().is_empty();
    Ok(info)
}

/// Collect every `w:t` text inside an element, paragraphs separated by `\n`.
fn scan_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = true;
                }
            }
            Event::Text(t) if in_text => current.push_str(&t.unescape()?),
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    Ok(paragraphs.join("\n"))
}

/// Read a `w:tbl` into rows of plain-text cells.
///
/// Nested tables are flattened into the text of the cell that holds them.
fn scan_table(xml: &str, styles: &StyleMap) -> Result<Table> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut table = Table::new();
    let mut table_depth = 0usize;
    let mut current_row: Option<Row> = None;
    let mut cell_start: Option<usize> = None;

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event()?;
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"tr" if table_depth == 1 => current_row = Some(Row::new()),
                b"tc" if table_depth == 1 => cell_start = Some(before),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tblStyle" if table_depth == 1 && table.style.is_none() => {
                    table.style = val_attr(&e)?.map(|id| styles.display_name(&id));
                }
                b"tblHeader" if table_depth == 1 => {
                    if let Some(row) = current_row.as_mut() {
                        row.is_header = true;
                    }
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"tr" if table_depth == 1 => {
                    if let Some(row) = current_row.take() {
                        table.add_row(row);
                    }
                }
                b"tc" if table_depth == 1 => {
                    if let (Some(start), Some(row)) = (cell_start.take(), current_row.as_mut()) {
                        let text = scan_text(&xml[start..after])?;
                        let mut cell = Cell::new();
                        for line in text.split('\n') {
                            let mut para = Paragraph::new();
                            para.add_run(TextRun::plain(line));
                            cell.content.push(para);
                        }
                        row.add_cell(cell);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(table)
}
