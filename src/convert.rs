use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{Result, ToolError};
use crate::flatten::process_sheet;
use crate::io::excel_read::{WorkbookSource, has_spreadsheet_extension};
use crate::io::text_write::write_lines;
use crate::model::{Diagnostic, SheetGrid};

/// Result of a conversion as reported to callers: the output path on success
/// or the error message on failure, plus the resolved input path so the caller
/// can clean it up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub success: bool,
    pub message: String,
    pub input: PathBuf,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Details of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub line_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Every output record of a workbook, in sheet order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlattenedWorkbook {
    pub lines: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FlattenedWorkbook {
    /// Appends the records of one sheet. A sheet that could not be read adds
    /// no lines and is recorded as skipped.
    pub fn push_sheet(&mut self, sheet: String, read: Result<SheetGrid>) {
        let grid = match read {
            Ok(grid) => grid,
            Err(err) => {
                warn!(%sheet, error = %err, "skipping unreadable sheet");
                self.diagnostics.push(Diagnostic::SheetSkipped {
                    sheet,
                    reason: err.to_string(),
                });
                return;
            }
        };

        let output = process_sheet(grid);
        debug!(%sheet, line_count = output.lines.len(), "sheet flattened");
        self.lines.extend(output.lines);
        self.diagnostics.extend(output.diagnostics);
    }
}

/// Converts a workbook into a pipe-delimited text file and folds any failure
/// into the returned outcome.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn convert(input: &Path, output: &Path) -> ConversionOutcome {
    let resolved_input = resolve_input(input);

    match convert_workbook(input, output) {
        Ok(report) => {
            info!(
                line_count = report.line_count,
                skipped = report.diagnostics.len(),
                "successfully created output file"
            );
            ConversionOutcome {
                success: true,
                message: report.output.display().to_string(),
                input: resolved_input,
                diagnostics: report.diagnostics,
            }
        }
        Err(err) => {
            error!(error = %err, "conversion failed");
            ConversionOutcome {
                success: false,
                message: err.to_string(),
                input: resolved_input,
                diagnostics: Vec::new(),
            }
        }
    }
}

/// Validates, flattens and writes a workbook. Nothing is written unless every
/// step before the write succeeded.
pub fn convert_workbook(input: &Path, output: &Path) -> Result<ConversionReport> {
    validate_input(input)?;
    let flattened = flatten_workbook(input)?;
    write_lines(output, &flattened.lines)?;

    Ok(ConversionReport {
        output: output.to_path_buf(),
        line_count: flattened.lines.len(),
        diagnostics: flattened.diagnostics,
    })
}

/// Checks that the input exists and carries a spreadsheet extension.
pub fn validate_input(input: &Path) -> Result<()> {
    if !input.exists() {
        return Err(ToolError::MissingInput(input.to_path_buf()));
    }
    if !has_spreadsheet_extension(input) {
        return Err(ToolError::InvalidFormat(input.to_path_buf()));
    }
    Ok(())
}

/// Reads every sheet in file order and concatenates their records. Sheets that
/// cannot be read are skipped and reported as diagnostics.
#[instrument(level = "debug", skip_all, fields(input = %input.display()))]
pub fn flatten_workbook(input: &Path) -> Result<FlattenedWorkbook> {
    let mut workbook = WorkbookSource::open(input)?;
    let mut flattened = FlattenedWorkbook::default();

    for sheet in workbook.sheet_names() {
        info!(%sheet, "processing sheet");
        let read = workbook.read_sheet(&sheet);
        flattened.push_sheet(sheet, read);
    }

    Ok(flattened)
}

fn resolve_input(input: &Path) -> PathBuf {
    fs::canonicalize(input)
        .or_else(|_| std::path::absolute(input))
        .unwrap_or_else(|_| input.to_path_buf())
}
