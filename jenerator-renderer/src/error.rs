//! Error types for jenerator-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template resolution and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Neither the config's directory nor the fallback directory holds the template.
    #[error("template '{name}' not found in {colocated} or {fallback}")]
    TemplateNotFound {
        name: String,
        colocated: PathBuf,
        fallback: PathBuf,
    },

    /// Filesystem error while reading a template.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    /// Tera rejected the template (syntax) or failed while rendering it.
    ///
    /// `detail` flattens Tera's cause chain; its top-level message alone
    /// rarely says which variable or tag was at fault.
    #[error("template error in {path}: {detail}")]
    Template {
        path: PathBuf,
        detail: String,
        #[source]
        source: tera::Error,
    },

    /// The record could not be turned into a Tera context.
    #[error("context serialization error: {0}")]
    Context(#[source] tera::Error),
}

impl RenderError {
    pub(crate) fn template(path: impl Into<PathBuf>, source: tera::Error) -> Self {
        RenderError::Template {
            path: path.into(),
            detail: cause_chain(&source),
            source,
        }
    }
}

/// `outer: inner: innermost` for a Tera error and its sources.
pub(crate) fn cause_chain(err: &tera::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut current: Option<&(dyn std::error::Error + 'static)> = std::error::Error::source(err);
    while let Some(cause) = current {
        parts.push(cause.to_string());
        current = cause.source();
    }
    parts.join(": ")
}
