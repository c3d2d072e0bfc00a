//! Error types for mir-git.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// All errors that can arise from running an external tool.
#[derive(Debug, Error)]
pub enum GitError {
    /// The executable could not be found on PATH or in known install locations.
    #[error("'{tool}' executable not found")]
    NotFound { tool: String },

    /// The process could not be started (permissions, bad working directory…).
    #[error("failed to start '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran and exited non-zero.
    #[error("`{tool} {args}` failed{}: {stderr}", .status.map(|c| format!(" (exit {c})")).unwrap_or_default())]
    CommandFailed {
        tool: String,
        args: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The tool did not finish within its time budget and was killed.
    #[error("`{tool} {args}` timed out after {}s", .after.as_secs())]
    Timeout {
        tool: String,
        args: String,
        after: Duration,
    },

    /// I/O failure around the subprocess (reading its output, waiting on it).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GitError {
    /// The tool is missing entirely; nothing else can work.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GitError::NotFound { .. })
    }

    /// The tool ran and reported failure (as opposed to not running at all).
    pub fn is_command_failure(&self) -> bool {
        matches!(self, GitError::CommandFailed { .. })
    }
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> GitError {
    GitError::Io {
        path: path.into(),
        source,
    }
}
