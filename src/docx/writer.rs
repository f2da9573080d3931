//! Writing blocks back to WordprocessingML.
//!
//! Loaded blocks are written from their source markup. Blocks created in
//! memory are generated here, with style names resolved to style IDs
//! through the document's [`StyleMap`].

use super::styles::{StyleMap, StyleType};
use crate::model::{
    Block, BodyContent, Heading, Paragraph, Table, TextAlignment, TextRun, TextStyle,
};
use quick_xml::escape::escape;

/// Serialize blocks into body markup.
pub(crate) fn write_blocks(blocks: &[Block], styles: &StyleMap) -> String {
    let mut out = String::new();
    for block in blocks {
        match block.source() {
            Some(source) => out.push_str(source),
            None => write_block(block, styles, &mut out),
        }
    }
    out
}

/// Generate markup for a single block, ignoring any source markup.
pub(crate) fn write_block(block: &Block, styles: &StyleMap, out: &mut String) {
    match block {
        Block::Heading(heading) => write_heading(heading, styles, out),
        Block::Body(body) => match body.content() {
            BodyContent::Paragraph(para) => write_paragraph(para, styles, out),
            BodyContent::Table(table) => write_table(table, styles, out),
            BodyContent::PageBreak => {
                out.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#)
            }
            BodyContent::Other { text, .. } => {
                write_paragraph(&Paragraph::with_text(text.clone()), styles, out)
            }
        },
    }
}

/// Resolve a style name to its ID, warning when the document lacks it.
fn resolve_style<'a>(styles: &'a StyleMap, name: &str, style_type: StyleType) -> Option<&'a str> {
    let id = styles.id_for_name(name, style_type);
    if id.is_none() {
        tracing::warn!(style = name, "style not defined in document, using default formatting");
    }
    id
}

fn write_heading(heading: &Heading, styles: &StyleMap, out: &mut String) {
    let name = heading.level().style_name();
    // Fall back to the built-in ID so the paragraph still reads as a heading
    let fallback = format!("Heading{}", heading.level().level());
    let id = styles
        .id_for_name(&name, StyleType::Paragraph)
        .unwrap_or(fallback.as_str());

    out.push_str("<w:p><w:pPr>");
    push_val(out, "w:pStyle", id);
    out.push_str("</w:pPr>");
    write_run(&TextRun::styled(heading.text(), heading.run_style().clone()), out);
    out.push_str("</w:p>");
}

fn write_paragraph(para: &Paragraph, styles: &StyleMap, out: &mut String) {
    out.push_str("<w:p>");

    let style_id = para
        .style
        .as_deref()
        .and_then(|name| resolve_style(styles, name, StyleType::Paragraph));
    let has_jc = para.alignment != TextAlignment::Left;
    if style_id.is_some() || has_jc || para.spacing_after.is_some() {
        out.push_str("<w:pPr>");
        if let Some(id) = style_id {
            push_val(out, "w:pStyle", id);
        }
        if let Some(after) = para.spacing_after {
            out.push_str(&format!(r#"<w:spacing w:after="{}"/>"#, after));
        }
        if has_jc {
            push_val(out, "w:jc", para.alignment.ooxml_value());
        }
        out.push_str("</w:pPr>");
    }

    for run in &para.runs {
        write_run(run, out);
    }
    out.push_str("</w:p>");
}

fn write_run(run: &TextRun, out: &mut String) {
    if run.is_empty() {
        return;
    }

    out.push_str("<w:r>");
    write_run_properties(&run.style, out);

    let mut pending = String::new();
    let mut dropped = 0usize;
    for ch in run.text.chars() {
        let markup = match ch {
            '\n' | '\u{0B}' => "<w:br/>",
            '\t' => "<w:tab/>",
            '\u{0C}' => r#"<w:br w:type="page"/>"#,
            '\r' => continue,
            _ if is_xml_char(ch) => {
                pending.push(ch);
                continue;
            }
            _ => {
                dropped += 1;
                continue;
            }
        };
        flush_text(&mut pending, out);
        out.push_str(markup);
    }
    flush_text(&mut pending, out);
    out.push_str("</w:r>");

    if dropped > 0 {
        tracing::warn!(dropped, "removed characters not allowed in XML from run text");
    }
}

/// Characters XML 1.0 allows in content.
fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}')
        || ch >= '\u{10000}'
}

/// Escape a string for XML, dropping characters XML cannot carry.
fn escape_xml(value: &str) -> String {
    if value.chars().all(is_xml_char) {
        escape(value).into_owned()
    } else {
        let clean: String = value.chars().filter(|&ch| is_xml_char(ch)).collect();
        escape(clean.as_str()).into_owned()
    }
}

fn flush_text(pending: &mut String, out: &mut String) {
    if pending.is_empty() {
        return;
    }
    out.push_str(r#"<w:t xml:space="preserve">"#);
    out.push_str(&escape(pending.as_str()));
    out.push_str("</w:t>");
    pending.clear();
}

fn write_run_properties(style: &TextStyle, out: &mut String) {
    if !style.has_formatting() {
        return;
    }

    out.push_str("<w:rPr>");
    if let Some(font) = &style.font {
        let font = escape_xml(font);
        out.push_str(&format!(
            r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:cs="{0}"/>"#,
            font
        ));
    }
    if style.bold {
        out.push_str("<w:b/>");
    }
    if style.italic {
        out.push_str("<w:i/>");
    }
    if let Some(color) = &style.color {
        push_val(out, "w:color", color);
    }
    if let Some(size) = style.size {
        push_val(out, "w:sz", &size.to_string());
    }
    if style.underline {
        push_val(out, "w:u", "single");
    }
    out.push_str("</w:rPr>");
}

fn write_table(table: &Table, styles: &StyleMap, out: &mut String) {
    out.push_str("<w:tbl><w:tblPr>");
    let style_id = table
        .style
        .as_deref()
        .and_then(|name| resolve_style(styles, name, StyleType::Table));
    if let Some(id) = style_id {
        push_val(out, "w:tblStyle", id);
    }
    out.push_str(r#"<w:tblW w:w="0" w:type="auto"/><w:tblLook w:val="04A0"/></w:tblPr>"#);

    out.push_str("<w:tblGrid>");
    for _ in 0..table.column_count() {
        out.push_str("<w:gridCol/>");
    }
    out.push_str("</w:tblGrid>");

    for row in &table.rows {
        out.push_str("<w:tr>");
        if row.is_header {
            out.push_str("<w:trPr><w:tblHeader/></w:trPr>");
        }
        for cell in &row.cells {
            out.push_str(r#"<w:tc><w:tcPr><w:tcW w:w="0" w:type="auto"/></w:tcPr>"#);
            if cell.content.is_empty() {
                // A cell must hold at least one paragraph
                out.push_str("<w:p/>");
            }
            for para in &cell.content {
                write_paragraph(para, styles, out);
            }
            out.push_str("</w:tc>");
        }
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
}

fn push_val(out: &mut String, element: &str, value: &str) {
    out.push_str(&format!(r#"<{} w:val="{}"/>"#, element, escape_xml(value)));
}
