//! Atomic publishing of final outputs.
//!
//! Publishing copies the averaged image to a dotted temporary name inside
//! the destination directory and renames it over the final path, so an
//! aborted run never leaves a half-written output behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use avgruns_core::{AvgRunsError, Result};

/// Publish `src` to `dest`, creating parent directories as needed.
pub fn publish(src: &Path, dest: &Path) -> Result<()> {
    let parent = dest.parent().ok_or_else(|| {
        AvgRunsError::InvalidConfiguration(format!(
            "output path has no parent directory: {}",
            dest.display()
        ))
    })?;
    fs::create_dir_all(parent).map_err(|e| AvgRunsError::io(parent, e))?;

    let file_name = dest
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            AvgRunsError::InvalidConfiguration(format!(
                "output path has no filename: {}",
                dest.display()
            ))
        })?;
    let tmp = parent.join(format!(".{file_name}.tmp"));

    // copy failures are write-side; report the temp destination
    fs::copy(src, &tmp).map_err(|e| AvgRunsError::io(&tmp, e))?;
    fs::rename(&tmp, dest).map_err(|e| AvgRunsError::io(dest, e))?;
    debug!(dest = %dest.display(), "published");
    Ok(())
}

/// True when `output` exists and is at least as new as every input, in
/// which case the subject can be skipped. Any unreadable timestamp is
/// treated as stale so the subject re-runs.
pub fn is_fresh(output: &Path, inputs: &[PathBuf]) -> bool {
    let Ok(out_meta) = fs::metadata(output) else {
        return false;
    };
    let Ok(out_mtime) = out_meta.modified() else {
        warn!(path = %output.display(), "output mtime unreadable, treating as stale");
        return false;
    };
    inputs.iter().all(|input| {
        fs::metadata(input)
            .and_then(|m| m.modified())
            .map(|in_mtime| in_mtime <= out_mtime)
            .unwrap_or(false)
    })
}
