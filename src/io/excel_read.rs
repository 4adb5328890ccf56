use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{DataType, Range, Reader, Sheets, open_workbook_auto};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Result, ToolError};
use crate::model::{CellValue, SheetGrid};

/// Spreadsheet extensions the reader accepts, compared case-insensitively.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Returns `true` when the path carries a recognised spreadsheet extension.
pub fn has_spreadsheet_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// An open workbook whose sheets are read lazily, in file order.
pub struct WorkbookSource {
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookSource {
    /// Opens the workbook, detecting its format from the extension.
    pub fn open(path: &Path) -> Result<Self> {
        let workbook = open_workbook_auto(path)?;
        Ok(Self { workbook })
    }

    /// Sheet names in the workbook's native order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// Reads one sheet as a text grid. Failures are reported as
    /// [`ToolError::SheetRead`] so the caller can skip the sheet.
    pub fn read_sheet(&mut self, name: &str) -> Result<SheetGrid> {
        let range = self
            .workbook
            .worksheet_range(name)
            .ok_or_else(|| ToolError::SheetRead {
                sheet: name.to_string(),
                message: "sheet not found".to_string(),
            })?
            .map_err(|error| ToolError::SheetRead {
                sheet: name.to_string(),
                message: error.to_string(),
            })?;

        Ok(grid_from_range(name, &range))
    }
}

/// Converts a used range into a grid. The first row provides the column names;
/// data rows made up entirely of empty cells are dropped. Columns to the left
/// of the used range are kept as empty cells so the grid starts at column A.
pub fn grid_from_range(name: &str, range: &Range<DataType>) -> SheetGrid {
    let leading = range.start().map_or(0, |(_, col)| col as usize);
    let mut rows = range.rows().map(|row| {
        let mut cells = vec![CellValue::Empty; leading];
        cells.extend(row.iter().map(cell_value));
        cells
    });

    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .into_iter()
            .enumerate()
            .map(|(col_idx, cell)| column_name(col_idx, cell))
            .collect(),
        None => return SheetGrid::empty(name),
    };

    let data = rows
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    SheetGrid::new(name, columns, data)
}

fn column_name(col_idx: usize, cell: CellValue) -> String {
    match cell {
        CellValue::Empty => format!("Unnamed: {col_idx}"),
        other => other.to_string(),
    }
}

/// Coerces a raw cell into its display value.
pub fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::String(value) if value.is_empty() => CellValue::Empty,
        DataType::String(value) => CellValue::Text(value.clone()),
        DataType::Float(value) => CellValue::Text(value.to_string()),
        DataType::Int(value) => CellValue::Text(value.to_string()),
        DataType::Bool(true) => CellValue::text("True"),
        DataType::Bool(false) => CellValue::text("False"),
        // A serial below one day is a time of day, not a date.
        DataType::DateTime(serial) if (0.0..1.0).contains(serial) => excel_serial_to_time(*serial)
            .map(|time| CellValue::Text(time.format("%H:%M:%S").to_string()))
            .unwrap_or_else(|| CellValue::Text(serial.to_string())),
        DataType::DateTime(serial) => excel_serial_to_datetime(*serial)
            .map(CellValue::Timestamp)
            .unwrap_or_else(|| CellValue::Text(serial.to_string())),
        other => CellValue::Text(other.to_string()),
    }
}

/// Converts a serial day number of the 1900 date system into a timestamp.
///
/// Serials below 61 are shifted by one day to account for the fictitious
/// 29 February 1900.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let epoch = if serial < 61.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let millis = (serial * 86_400_000.0).round() as i64;

    epoch
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::milliseconds(millis))
}

/// Converts the fractional part of a serial into a time of day, rounded to
/// the nearest second.
pub fn excel_serial_to_time(serial: f64) -> Option<NaiveTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let seconds = ((serial.fract() * 86_400.0).round() as u32) % 86_400;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
}
