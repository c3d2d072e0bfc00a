//! Status aggregation across every registered project.

use std::path::PathBuf;

use mir_core::{ProjectName, ProjectRecord, Registry};
use mir_git::{probe, Git, Probe, RepoStatus};

/// What was found at a project's recorded path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The recorded path no longer exists.
    MissingPath,
    /// The path exists but has no git metadata.
    NotARepo,
    Repo(RepoStatus),
}

/// One row of the consolidated report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub name: ProjectName,
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl StatusEntry {
    /// Known to have uncommitted changes.
    pub fn is_dirty(&self) -> bool {
        match &self.outcome {
            Outcome::Repo(status) => status.dirty() == Some(true),
            _ => false,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.outcome, Outcome::MissingPath)
    }
}

/// Counts for the report footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub projects: usize,
    pub dirty: usize,
    pub missing: usize,
}

impl Summary {
    pub fn of(entries: &[StatusEntry]) -> Self {
        Self {
            projects: entries.len(),
            dirty: entries.iter().filter(|e| e.is_dirty()).count(),
            missing: entries.iter().filter(|e| e.is_missing()).count(),
        }
    }
}

/// Status of a single record. Never fails; problems become the outcome.
pub fn entry(git: &Git, record: &ProjectRecord) -> StatusEntry {
    let outcome = if !record.path.exists() {
        tracing::debug!("{}: path missing ({})", record.name, record.path.display());
        Outcome::MissingPath
    } else {
        match probe(git, &record.path) {
            Probe::NotARepo => Outcome::NotARepo,
            Probe::Repo(status) => Outcome::Repo(status),
        }
    };
    StatusEntry {
        name: record.name.clone(),
        path: record.path.clone(),
        outcome,
    }
}

/// Probe every registered project, sorted by name regardless of stored
/// order. The registry is only read.
pub fn aggregate(git: &Git, registry: &Registry) -> Vec<StatusEntry> {
    let mut entries: Vec<StatusEntry> = registry.iter().map(|r| entry(git, r)).collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!("aggregated status for {} project(s)", entries.len());
    entries
}
