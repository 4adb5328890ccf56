use tracing::{debug, warn};

use crate::error::{Result, ToolError};
use crate::model::{CellValue, Diagnostic, SheetGrid};
use crate::normalize::date::{format_date, is_date_column};
use crate::normalize::value::format_cell;

/// Separator placed between the fields of an output record.
pub const FIELD_DELIMITER: &str = "|";

/// Lines produced for one sheet plus the problems absorbed along the way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetOutput {
    pub lines: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Flattens a sheet into pipe-delimited records, one per data row.
///
/// Date-like columns are reformatted first, column by column; afterwards every
/// cell is normalised in row order with the sheet and column name as context.
pub fn process_sheet(mut grid: SheetGrid) -> SheetOutput {
    if grid.is_empty() {
        return SheetOutput::default();
    }

    let diagnostics = normalize_date_columns(&mut grid);
    let lines = grid
        .rows
        .iter()
        .map(|row| flatten_row(row, &grid.columns, &grid.name))
        .collect();

    SheetOutput { lines, diagnostics }
}

/// Rewrites every date-like column of the grid in place. A column that fails
/// keeps its original values and yields a diagnostic.
pub fn normalize_date_columns(grid: &mut SheetGrid) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for col_idx in 0..grid.column_count() {
        if !is_date_column(grid.rows.iter().map(|row| cell_at(row, col_idx))) {
            continue;
        }

        match format_column(grid, col_idx) {
            Ok(values) => {
                for (row, value) in grid.rows.iter_mut().zip(values) {
                    if let Some(cell) = row.get_mut(col_idx) {
                        *cell = CellValue::Text(value);
                    }
                }
                debug!(sheet = %grid.name, column = %grid.columns[col_idx], "formatted date column");
            }
            Err(error) => {
                warn!(%error, "skipping date formatting for column");
                diagnostics.push(Diagnostic::ColumnUnformatted {
                    sheet: grid.name.clone(),
                    column: grid.columns[col_idx].clone(),
                    reason: error.to_string(),
                });
            }
        }
    }

    diagnostics
}

fn format_column(grid: &SheetGrid, col_idx: usize) -> Result<Vec<String>> {
    grid.rows
        .iter()
        .map(|row| format_date(cell_at(row, col_idx)))
        .collect::<Result<Vec<_>>>()
        .map_err(|error| ToolError::ColumnFormat {
            sheet: grid.name.clone(),
            column: grid.columns[col_idx].clone(),
            message: error.to_string(),
        })
}

fn flatten_row(row: &[CellValue], columns: &[String], sheet: &str) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(col_idx, column)| format_cell(cell_at(row, col_idx), sheet, column))
        .collect::<Vec<_>>()
        .join(FIELD_DELIMITER)
}

fn cell_at(row: &[CellValue], col_idx: usize) -> &CellValue {
    const MISSING: &CellValue = &CellValue::Empty;
    row.get(col_idx).unwrap_or(MISSING)
}
