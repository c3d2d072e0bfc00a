//! Error types for mir-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from config store operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure, annotated with the file it happened on.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (write/save path).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON parse error on load, with the file path and serde_json's line context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

/// Failure to map the user's context onto a single project.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// An explicit `--project` name is not in the registry.
    #[error("no tracked project named '{name}'")]
    ProjectNotFound { name: String },

    /// No explicit name or path, and the working directory is neither a
    /// repository nor inside a tracked project.
    #[error("cannot determine project from {cwd}; run from inside a project folder or pass --project <name>")]
    CannotDetermine { cwd: PathBuf },
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
