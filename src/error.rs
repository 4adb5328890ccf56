use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur while a
/// workbook is read, normalised, and flattened to text.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a conversion report cannot be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the spreadsheet reader when opening a workbook.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Raised when the input path does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the input does not carry a spreadsheet extension.
    #[error("input file must be a spreadsheet (.xlsx, .xlsm, .xlsb, .xls or .ods): {0}")]
    InvalidFormat(PathBuf),

    /// Raised when a single sheet cannot be parsed. Recoverable.
    #[error("failed to read sheet '{sheet}': {message}")]
    SheetRead { sheet: String, message: String },

    /// Raised when a date column cannot be reformatted. Recoverable.
    #[error("failed to format column '{column}' in sheet '{sheet}': {message}")]
    ColumnFormat {
        sheet: String,
        column: String,
        message: String,
    },

    /// Raised when a value looks like a date but does not parse as one.
    #[error("unparseable date value '{0}'")]
    InvalidDate(String),

    /// Raised when the flattened output cannot be persisted.
    #[error("failed to write output {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised when a stale output file cannot be removed.
    #[error("error deleting {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised by the command line when a conversion reported failure.
    #[error("{0}")]
    ConversionFailed(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
