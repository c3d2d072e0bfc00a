//! Error types for mir-sync.

use std::path::PathBuf;

use thiserror::Error;

use mir_git::GitError;
use mir_scaffold::ScaffoldError;

/// Errors that stop a multi-step operation outright.
///
/// Step failures the workflow can carry on from (a rejected push, an empty
/// initial commit) are reported in the result types instead.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("git error: {0}")]
    Git(#[from] GitError),

    #[error("scaffold error: {0}")]
    Scaffold(#[from] ScaffoldError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `path` exists but is a file.
    #[error("{path} exists and is not a directory")]
    NotADirectory { path: PathBuf },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
