//! Page layout for new documents.
//!
//! All measurements are in twentieths of a point (twips); an inch is 1440.

use serde::{Deserialize, Serialize};

/// Twips per inch.
pub const TWIPS_PER_INCH: u32 = 1440;

/// A border drawn around every page, measured from the page edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBorder {
    /// Line style, e.g. "single" or "double"
    pub style: String,
    /// Line width in eighths of a point
    pub size: u32,
    /// Distance from the page edge in points
    pub space: u32,
    /// Hex RGB color without '#'
    pub color: String,
}

impl Default for PageBorder {
    fn default() -> Self {
        Self {
            style: "single".to_string(),
            size: 24,
            space: 24,
            color: "000000".to_string(),
        }
    }
}

impl PageBorder {
    /// A single 3pt border in the given color.
    pub fn colored(color: impl Into<String>) -> Self {
        Self {
            color: color.into().trim_start_matches('#').to_string(),
            ..Default::default()
        }
    }

    fn write_side(&self, side: &str, out: &mut String) {
        out.push_str(&format!(
            r#"<w:{} w:val="{}" w:sz="{}" w:space="{}" w:color="{}"/>"#,
            side,
            quick_xml::escape::escape(self.style.as_str()),
            self.size,
            self.space,
            quick_xml::escape::escape(self.color.as_str()),
        ));
    }
}

/// Page size, margins and border of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    pub width: u32,
    pub height: u32,
    pub margin_top: u32,
    pub margin_right: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<PageBorder>,
}

impl Default for PageLayout {
    /// US Letter with one-inch margins.
    fn default() -> Self {
        Self {
            width: 12240,
            height: 15840,
            margin_top: TWIPS_PER_INCH,
            margin_right: TWIPS_PER_INCH,
            margin_bottom: TWIPS_PER_INCH,
            margin_left: TWIPS_PER_INCH,
            border: None,
        }
    }
}

impl PageLayout {
    /// US Letter with one-inch margins and no border.
    pub fn letter() -> Self {
        Self::default()
    }

    /// A4 with one-inch margins and no border.
    pub fn a4() -> Self {
        Self {
            width: 11906,
            height: 16838,
            ..Self::default()
        }
    }

    /// Set all four margins, in inches.
    pub fn with_margins_inches(mut self, inches: f32) -> Self {
        let twips = (inches.max(0.0) * TWIPS_PER_INCH as f32).round() as u32;
        self.margin_top = twips;
        self.margin_right = twips;
        self.margin_bottom = twips;
        self.margin_left = twips;
        self
    }

    /// Draw a border around every page.
    pub fn with_border(mut self, border: PageBorder) -> Self {
        self.border = Some(border);
        self
    }

    /// Section properties markup for this layout.
    pub(crate) fn section_properties(&self) -> String {
        let mut out = String::from("<w:sectPr>");
        out.push_str(&format!(
            r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
            self.width, self.height
        ));
        out.push_str(&format!(
            r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="720" w:footer="720" w:gutter="0"/>"#,
            self.margin_top, self.margin_right, self.margin_bottom, self.margin_left
        ));
        if let Some(border) = &self.border {
            out.push_str(r#"<w:pgBorders w:offsetFrom="page">"#);
            // Schema order: top, left, bottom, right
            for side in ["top", "left", "bottom", "right"] {
                border.write_side(side, &mut out);
            }
            out.push_str("</w:pgBorders>");
        }
        out.push_str("</w:sectPr>");
        out
    }
}
