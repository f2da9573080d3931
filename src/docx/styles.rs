//! DOCX styles parsing.
//!
//! Only what section editing needs: style IDs, display names, inheritance
//! and outline levels. Names are what users see ("Heading 1", "Body Text");
//! IDs are what paragraphs reference (`Heading1`, `BodyText`).

use crate::error::{Error, Result};
use crate::model::HeadingLevel;
use std::collections::HashMap;

/// Style type (paragraph, character, table, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleType {
    Paragraph,
    Character,
    Table,
    Numbering,
}

/// A parsed style definition.
#[derive(Debug, Clone, Default)]
pub struct Style {
    /// Style ID (e.g., "Heading1")
    pub id: String,
    /// Style name (e.g., "heading 1")
    pub name: String,
    pub style_type: Option<StyleType>,
    /// Based on another style
    pub based_on: Option<String>,
    /// Outline level (0-based, headings only)
    pub outline_level: Option<u8>,
}

/// Collection of styles from styles.xml.
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    /// Styles by ID
    pub styles: HashMap<String, Style>,
    /// Default paragraph style ID
    pub default_paragraph: Option<String>,
}

impl StyleMap {
    /// Parse styles from XML content.
    pub fn parse(xml: &str) -> Result<Self> {
        if xml.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut map = StyleMap::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut current_style: Option<Style> = None;
        let mut in_ppr = false;

        loop {
            match reader.read_event() {
                Ok(quick_xml::events::Event::Start(e)) => match e.local_name().as_ref() {
                    b"style" => {
                        let style = start_style(&e, &mut map)?;
                        current_style = Some(style);
                    }
                    b"pPr" if current_style.is_some() => in_ppr = true,
                    _ => {}
                },
                Ok(quick_xml::events::Event::Empty(e)) => {
                    let local = e.local_name();
                    if local.as_ref() == b"style" {
                        // A self-closing style has nothing but its attributes
                        let style = start_style(&e, &mut map)?;
                        map.styles.insert(style.id.clone(), style);
                    } else if let Some(ref mut style) = current_style {
                        match local.as_ref() {
                            b"name" => {
                                if let Some(val) = val_attr(&e)? {
                                    style.name = val;
                                }
                            }
                            b"basedOn" => style.based_on = val_attr(&e)?,
                            b"outlineLvl" if in_ppr => {
                                style.outline_level = val_attr(&e)?.and_then(|v| v.parse().ok());
                            }
                            _ => {}
                        }
                    }
                }
                Ok(quick_xml::events::Event::End(e)) => match e.local_name().as_ref() {
                    b"style" => {
                        if let Some(style) = current_style.take() {
                            map.styles.insert(style.id.clone(), style);
                        }
                        in_ppr = false;
                    }
                    b"pPr" => in_ppr = false,
                    _ => {}
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
        }

        tracing::debug!(styles = map.styles.len(), "parsed style map");
        Ok(map)
    }

    /// Get a style by ID, resolving inherited outline levels.
    pub fn get_resolved(&self, id: &str) -> Option<Style> {
        let mut style = self.styles.get(id)?.clone();

        // Resolve inheritance chain (max 10 levels to prevent infinite loops)
        let mut depth = 0;
        let mut current_based_on = style.based_on.clone();
        while let Some(ref base_id) = current_based_on {
            if depth > 10 {
                break;
            }
            match self.styles.get(base_id) {
                Some(base) => {
                    if style.outline_level.is_none() {
                        style.outline_level = base.outline_level;
                    }
                    current_based_on = base.based_on.clone();
                }
                None => break,
            }
            depth += 1;
        }

        Some(style)
    }

    /// Get the heading level for a paragraph style ID.
    ///
    /// A style named "Heading N" (any case) is level N. Otherwise an
    /// explicit or inherited outline level decides. Styles missing from
    /// the map fall back to the built-in `HeadingN` ID pattern.
    pub fn get_heading_level(&self, style_id: &str) -> Option<HeadingLevel> {
        match self.get_resolved(style_id) {
            Some(style) => heading_number(&style.name)
                .and_then(HeadingLevel::from_number)
                .or_else(|| {
                    style
                        .outline_level
                        .and_then(|level| HeadingLevel::from_number(level.saturating_add(1)))
                }),
            None => style_id
                .strip_prefix("Heading")
                .and_then(|n| n.parse().ok())
                .and_then(HeadingLevel::from_number),
        }
    }

    /// Display name for a style ID; unknown IDs are returned as-is.
    pub fn display_name(&self, style_id: &str) -> String {
        self.styles
            .get(style_id)
            .map(|s| s.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| style_id.to_string())
    }

    /// Name of the style applied to paragraphs without an explicit style.
    pub fn default_paragraph_name(&self) -> String {
        self.default_paragraph
            .as_deref()
            .map(|id| self.display_name(id))
            .unwrap_or_else(|| "Normal".to_string())
    }

    /// Find the ID of a style of the given type by its display name
    /// (case-insensitive).
    ///
    /// Word stores built-in names in lower case ("heading 1") while users
    /// write them capitalized ("Heading 1"), so both resolve. A style
    /// without a `w:type` is a paragraph style. When several styles share
    /// a name the smallest ID wins.
    pub fn id_for_name(&self, name: &str, style_type: StyleType) -> Option<&str> {
        self.styles
            .values()
            .filter(|style| style.style_type.unwrap_or(StyleType::Paragraph) == style_type)
            .filter(|style| style.name.eq_ignore_ascii_case(name))
            .map(|style| style.id.as_str())
            .min()
    }
}

/// Parse the attributes of a `w:style` start tag.
fn start_style(e: &quick_xml::events::BytesStart, map: &mut StyleMap) -> Result<Style> {
    let mut style = Style::default();
    let mut is_default = false;

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.to_string();
        match attr.key.local_name().as_ref() {
            b"styleId" => style.id = value,
            b"type" => {
                style.style_type = match value.as_str() {
                    "paragraph" => Some(StyleType::Paragraph),
                    "character" => Some(StyleType::Character),
                    "table" => Some(StyleType::Table),
                    "numbering" => Some(StyleType::Numbering),
                    _ => None,
                };
            }
            b"default" => is_default = value == "1" || value == "true",
            _ => {}
        }
    }

    if is_default && style.style_type == Some(StyleType::Paragraph) {
        map.default_paragraph = Some(style.id.clone());
    }
    Ok(style)
}

/// Read the `w:val` attribute of an element.
pub(crate) fn val_attr(e: &quick_xml::events::BytesStart) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == b"val" {
            return Ok(Some(attr.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

/// "Heading 3" / "heading 3" -> 3
fn heading_number(name: &str) -> Option<u8> {
    let lower = name.to_ascii_lowercase();
    lower.strip_prefix("heading ")?.trim().parse().ok()
}
