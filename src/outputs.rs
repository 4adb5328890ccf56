//! Naming and retention of converted files in an output directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::NaiveDateTime;
use tracing::{debug, info, instrument};

use crate::error::{Result, ToolError};

/// Marker inserted between the input name and the timestamp.
pub const OUTPUT_MARKER: &str = "_Pip_Sep_";

/// Extension of generated output files.
pub const OUTPUT_EXTENSION: &str = "csv";

/// Default age after which outputs are considered stale.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(30 * 60);

/// Builds `<dir>/<input file name>_Pip_Sep_<YYYYmmdd_HHMMSS>.csv`.
pub fn timestamped_output_path(input: &Path, output_dir: &Path, now: NaiveDateTime) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook".to_string());

    output_dir.join(format!(
        "{file_name}{OUTPUT_MARKER}{}.{OUTPUT_EXTENSION}",
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// Deletes regular files in `dir` last modified more than `max_age` before
/// `now` and returns their paths, sorted. Stops at the first file that cannot
/// be removed.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), max_age_secs = max_age.as_secs()))]
pub fn purge_stale_outputs(dir: &Path, max_age: Duration, now: SystemTime) -> Result<Vec<PathBuf>> {
    let cutoff = now.checked_sub(max_age).unwrap_or(SystemTime::UNIX_EPOCH);

    let mut stale = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        if metadata.modified()? < cutoff {
            stale.push(entry.path());
        }
    }
    stale.sort();

    for path in &stale {
        fs::remove_file(path).map_err(|source| ToolError::Cleanup {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "deleted stale output");
    }

    info!(deleted = stale.len(), "cleanup completed");
    Ok(stale)
}
