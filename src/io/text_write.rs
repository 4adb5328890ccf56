use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, ToolError};

/// Separator placed between output records.
pub const LINE_SEPARATOR: &str = "\n";

/// Writes the records to `path` as UTF-8, joined by newlines, replacing any
/// existing file.
///
/// The content is staged in a temporary file next to the destination and only
/// renamed into place once fully written, so a failure never leaves a partial
/// output behind.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let write_error = |source| ToolError::Write {
        path: path.to_path_buf(),
        source,
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(directory).map_err(write_error)?;
    staged
        .write_all(lines.join(LINE_SEPARATOR).as_bytes())
        .and_then(|()| staged.flush())
        .map_err(write_error)?;
    staged
        .persist(path)
        .map_err(|error| write_error(error.error))?;

    Ok(())
}
