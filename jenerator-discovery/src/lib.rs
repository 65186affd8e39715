//! Config discovery for `jenerator-discovery`.
//!
//! [`locate_configs`] walks a directory tree and returns every regular file
//! whose base name equals the configured config name. Results come back in
//! walk order.

use std::path::{Path, PathBuf};

use jenerator_core::WalkOptions;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Errors from config discovery.
#[derive(Debug, Error)]
pub enum DiscoverError {
    /// The walk root itself could not be read.
    #[error("cannot walk {path}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Find every file named `config_name` under `root`.
///
/// Entries that cannot be read mid-walk (permissions, vanished files, symlink
/// loops when following links) are logged and skipped; only an unreadable
/// root is an error. An empty result is a valid, silent outcome.
pub fn locate_configs(
    root: &Path,
    config_name: &str,
    options: &WalkOptions,
) -> Result<Vec<PathBuf>, DiscoverError> {
    std::fs::read_dir(root).map_err(|source| DiscoverError::Root {
        path: root.to_path_buf(),
        source,
    })?;

    let mut walker = WalkDir::new(root).follow_links(options.follow_links);
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth);
    }

    let mut found = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| !is_excluded(e, &options.exclude))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if let Some(ancestor) = err.loop_ancestor() {
                    tracing::warn!(
                        "symlink loop at {} (points back to {}); not descending",
                        err.path().map(|p| p.display().to_string()).unwrap_or_default(),
                        ancestor.display()
                    );
                } else {
                    tracing::warn!("skipping unreadable entry: {err}");
                }
                continue;
            }
        };

        if entry.file_name() != config_name || !is_config_file(&entry) {
            continue;
        }
        tracing::debug!("found config: {}", entry.path().display());
        found.push(entry.into_path());
    }
    Ok(found)
}

fn is_excluded(entry: &DirEntry, exclude: &[String]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| exclude.iter().any(|x| x == name))
}

/// Regular files, plus symlinks whose target is a regular file.
fn is_config_file(entry: &DirEntry) -> bool {
    let ft = entry.file_type();
    ft.is_file() || (ft.is_symlink() && entry.path().is_file())
}
