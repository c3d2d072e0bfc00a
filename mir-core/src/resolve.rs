//! Project resolution: turn what the user typed (or where they are standing)
//! into exactly one project directory.
//!
//! Resolution order, first match wins:
//! 1. explicit path
//! 2. explicit name present in the registry
//! 3. the working directory itself, when it is a git repository
//! 4. the first registered project (stored order) whose path contains the
//!    working directory
//!
//! Step 4 takes the first match in stored order, not the longest path.

use std::path::{Path, PathBuf};

use crate::error::ResolveError;
use crate::types::{ProjectName, Registry};

/// How a [`ResolvedProject`] was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    ExplicitPath,
    ExplicitName,
    WorkingDirectory,
    EnclosingProject,
}

/// A single project directory the user meant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProject {
    /// Registry name, when the directory is a tracked project.
    pub name: Option<ProjectName>,
    pub path: PathBuf,
    pub resolution: Resolution,
}

impl ResolvedProject {
    /// Registry name if tracked, otherwise the directory name.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.0.clone(),
            None => self
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.path.display().to_string()),
        }
    }
}

/// Whether `path` carries git metadata (`.git` directory or worktree file).
pub fn has_git_metadata(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Resolve the target project. See the module docs for the order.
///
/// An explicit name that is not registered is skipped with a warning and
/// resolution continues from the working directory. If that also finds
/// nothing the error is [`ResolveError::ProjectNotFound`] for the name.
pub fn resolve(
    registry: &Registry,
    explicit_name: Option<&str>,
    explicit_path: Option<&Path>,
    cwd: &Path,
) -> Result<ResolvedProject, ResolveError> {
    if let Some(path) = explicit_path {
        return Ok(ResolvedProject {
            name: registry.find_by_path(path).map(|r| r.name.clone()),
            path: path.to_path_buf(),
            resolution: Resolution::ExplicitPath,
        });
    }

    if let Some(name) = explicit_name {
        match registry.get(name) {
            Some(record) => {
                return Ok(ResolvedProject {
                    name: Some(record.name.clone()),
                    path: record.path.clone(),
                    resolution: Resolution::ExplicitName,
                })
            }
            None => tracing::warn!(project = name, "not a tracked project, using working directory"),
        }
    }

    if has_git_metadata(cwd) {
        return Ok(ResolvedProject {
            name: registry.find_by_path(cwd).map(|r| r.name.clone()),
            path: cwd.to_path_buf(),
            resolution: Resolution::WorkingDirectory,
        });
    }

    if let Some(record) = registry.iter().find(|r| cwd.starts_with(&r.path)) {
        tracing::debug!(project = %record.name, cwd = %cwd.display(), "matched enclosing project");
        return Ok(ResolvedProject {
            name: Some(record.name.clone()),
            path: record.path.clone(),
            resolution: Resolution::EnclosingProject,
        });
    }

    Err(match explicit_name {
        Some(name) => ResolveError::ProjectNotFound {
            name: name.to_string(),
        },
        None => ResolveError::CannotDetermine {
            cwd: cwd.to_path_buf(),
        },
    })
}
