//! Error types for jenerator-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading a config record.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error: includes line/column context from serde_yaml.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed, but its top level is not a mapping.
    #[error("config {path} must be a mapping at the top level, found {found}")]
    NotAMapping { path: PathBuf, found: &'static str },

    /// A mapping key that cannot become a template variable name.
    #[error("config {path} has an unsupported key: {reason}")]
    UnsupportedKey { path: PathBuf, reason: String },
}
