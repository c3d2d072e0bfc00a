//! Error types for mir-scaffold.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from rendering or writing scaffold files.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Filesystem error while loading overrides or writing output.
    #[error("scaffold io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ScaffoldError {
    ScaffoldError::Io {
        path: path.into(),
        source,
    }
}
