//! Table model structures.

use super::{Paragraph, TextAlignment, TextRun, TextStyle};
use serde::{Deserialize, Serialize};

/// A cell in a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Cell content (paragraphs)
    #[serde(default)]
    pub content: Vec<Paragraph>,
}

impl Cell {
    /// Create a new empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell with text content.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Paragraph::with_text(text)],
        }
    }

    /// Create a cell holding one formatted paragraph.
    pub fn styled(text: impl Into<String>, style: TextStyle, alignment: TextAlignment) -> Self {
        let mut para = Paragraph::new().with_alignment(alignment);
        para.add_run(TextRun::styled(text, style));
        Self {
            content: vec![para],
        }
    }

    /// Get plain text content of the cell.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A row in a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Cells in this row
    #[serde(default)]
    pub cells: Vec<Cell>,

    /// Whether this row repeats as a header
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_header: bool,
}

impl Row {
    /// Create a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a header row.
    pub fn header() -> Self {
        Self {
            is_header: true,
            ..Default::default()
        }
    }

    /// Add a cell to this row.
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }
}

/// A table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table rows
    #[serde(default)]
    pub rows: Vec<Row>,

    /// Table style name (e.g. "Table Grid")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with the given style name.
    pub fn with_style(style: impl Into<String>) -> Self {
        Self {
            style: Some(style.into()),
            ..Default::default()
        }
    }

    /// Build a plain-text table from string rows; the first row is a header.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut table = Table::new();
        for (i, cells) in rows.into_iter().enumerate() {
            let mut row = if i == 0 { Row::header() } else { Row::new() };
            for text in cells {
                row.add_cell(Cell::with_text(text));
            }
            table.add_row(row);
        }
        table
    }

    /// Add a row to this table.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get the number of columns (widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Plain text: cells separated by tabs, rows by newlines.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|c| c.plain_text())
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
