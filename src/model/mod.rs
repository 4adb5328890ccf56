use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Rendering used when a native timestamp is stringified outside of a date
/// column.
pub const TIMESTAMP_TEXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single cell as read from a sheet. Everything is text except for native
/// date/time cells, which keep their timestamp so that date columns can be
/// reformatted without a round trip through a string.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Missing value.
    #[default]
    Empty,
    /// Display text of the cell.
    Text(String),
    /// Native date/time cell.
    Timestamp(NaiveDateTime),
}

impl CellValue {
    /// Builds a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Returns `true` for missing values.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Timestamp(value) => write!(f, "{}", value.format(TIMESTAMP_TEXT_FORMAT)),
        }
    }
}

/// A sheet materialised as a header row plus data rows. Every row holds exactly
/// one cell per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetGrid {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    /// Builds a grid, padding or truncating each row to the header width.
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Returns an empty grid carrying only the sheet name.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A recoverable problem absorbed during a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The sheet could not be read and contributed no rows.
    SheetSkipped { sheet: String, reason: String },
    /// A date-like column kept its original values.
    ColumnUnformatted {
        sheet: String,
        column: String,
        reason: String,
    },
}
