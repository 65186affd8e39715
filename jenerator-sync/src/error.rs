//! Error types for jenerator-sync.

use std::path::PathBuf;

use thiserror::Error;

use jenerator_core::RecordError;
use jenerator_discovery::DiscoverError;
use jenerator_renderer::RenderError;

/// All errors that can arise while processing configs.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The config could not be read or parsed.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Template lookup or rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Config discovery could not start.
    #[error(transparent)]
    Discover(#[from] DiscoverError),

    /// Writing the output failed, with annotated path for context.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
