//! Guarded output writer.
//!
//! ## `write_output`: decision order
//!
//! 1. Existing regular file and no `force` → preserved, nothing written.
//! 2. `dry_run` → report what would happen.
//! 3. Write to `<path>.jenerator.tmp`.
//! 4. Rename over the final path (atomic on POSIX).
//!
//! Content is written exactly as rendered.

use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of writing one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// No output existed; it was created.
    Created { path: PathBuf },
    /// An output existed and `force` replaced it.
    Overwritten { path: PathBuf },
    /// An output existed and `force` was not set; it was left alone.
    Preserved { path: PathBuf },
    /// `--dry-run`: the file would have been created.
    WouldCreate { path: PathBuf },
    /// `--dry-run`: the existing file would have been replaced.
    WouldOverwrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Created { path }
            | WriteResult::Overwritten { path }
            | WriteResult::Preserved { path }
            | WriteResult::WouldCreate { path }
            | WriteResult::WouldOverwrite { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// write_output
// ---------------------------------------------------------------------------

/// Write `content` to `path` unless an existing file must be preserved.
///
/// The existence check happens immediately before the write.
pub fn write_output(
    path: &Path,
    content: &str,
    force: bool,
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    let tmp = PathBuf::from(format!("{}.jenerator.tmp", path.display()));
    write_output_with_tmp(path, content, force, dry_run, &tmp)
}

fn write_output_with_tmp(
    path: &Path,
    content: &str,
    force: bool,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, SyncError> {
    let exists = path.is_file();
    if exists && !force {
        tracing::debug!("preserved: {}", path.display());
        return Ok(WriteResult::Preserved {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        let path = path.to_path_buf();
        return Ok(if exists {
            WriteResult::WouldOverwrite { path }
        } else {
            WriteResult::WouldCreate { path }
        });
    }

    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    let path = path.to_path_buf();
    Ok(if exists {
        WriteResult::Overwritten { path }
    } else {
        WriteResult::Created { path }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
