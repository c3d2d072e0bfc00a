//! Stage → commit → push for one resolved project.
//!
//! ```text
//! CheckDirty ─ clean ─────────────────────────────▶ UpToDate
//!     │ dirty
//! Stage ─ fail ───────────────────────────────────▶ StageFailed
//! Commit ─ fail ──────────────────────────────────▶ CommitFailed
//!     │
//!     ├─ origin ─▶ push ─ ok ─────────────────────▶ Pushed
//!     │                 └ fail/timeout ───────────▶ PushFailed
//!     └─ none ───▶ provisioner ─ declines ────────▶ CommittedLocally
//!                       └ repo ─▶ remote add + push -u ─▶ RemoteCreated / PushFailed
//! ```
//!
//! Every git call happens at most once. Nothing here touches the registry.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use mir_core::ResolvedProject;
use mir_git::{ChangedEntry, Git, RepoSpec};

const ORIGIN: &str = "origin";
const DEFAULT_BRANCH: &str = "main";

// ---------------------------------------------------------------------------
// Remote provisioning
// ---------------------------------------------------------------------------

/// What the orchestrator knows when a project has no `origin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRequest<'a> {
    /// Suggested repository name (the project name).
    pub repo_name: &'a str,
    pub local_path: &'a Path,
    pub description: Option<&'a str>,
}

/// Decides whether, and where, a missing remote gets created.
///
/// The CLI implementation prompts and drives `gh`; tests script it.
pub trait RemoteProvisioner {
    /// Return the repository that now exists remotely, or `None` to stay
    /// local.
    fn provision(&mut self, request: &RemoteRequest<'_>) -> Option<RepoSpec>;
}

/// Never creates a remote.
#[derive(Debug, Clone, Copy, Default)]
pub struct StayLocal;

impl RemoteProvisioner for StayLocal {
    fn provision(&mut self, _request: &RemoteRequest<'_>) -> Option<RepoSpec> {
        None
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Final state of a push run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The directory has no git metadata.
    NotARepo,
    /// `git status` itself failed; nothing was attempted.
    StatusFailed { error: String },
    UpToDate,
    StageFailed { error: String },
    CommitFailed { error: String },
    Pushed,
    /// The commit exists locally; only the push failed.
    PushFailed { error: String },
    /// Committed, no remote configured or created.
    CommittedLocally,
    /// A new remote was added and the first push succeeded.
    RemoteCreated,
}

impl SyncOutcome {
    /// A commit was made in this run.
    pub fn committed(&self) -> bool {
        matches!(
            self,
            SyncOutcome::Pushed
                | SyncOutcome::PushFailed { .. }
                | SyncOutcome::CommittedLocally
                | SyncOutcome::RemoteCreated
        )
    }
}

/// Everything a caller needs to report one push run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub project_path: PathBuf,
    pub changes: Vec<ChangedEntry>,
    /// Commit message used (or attempted).
    pub message: Option<String>,
    /// `"<short hash> <subject>"` of the new commit.
    pub commit: Option<String>,
    /// Repository added as `origin` during this run, if any.
    pub remote_added: Option<RepoSpec>,
    pub outcome: SyncOutcome,
}

impl SyncResult {
    fn new(path: &Path, outcome: SyncOutcome) -> Self {
        Self {
            project_path: path.to_path_buf(),
            changes: Vec::new(),
            message: None,
            commit: None,
            remote_added: None,
            outcome,
        }
    }
}

// ---------------------------------------------------------------------------
// Commit message
// ---------------------------------------------------------------------------

/// `Update YYYY-MM-DD HH:MM: a, b, c +N more`, naming the first three
/// changed paths.
pub fn commit_message(changes: &[ChangedEntry], now: NaiveDateTime) -> String {
    let names: Vec<&str> = changes.iter().take(3).map(|c| c.path.as_str()).collect();
    let mut message = format!("Update {}: {}", now.format("%Y-%m-%d %H:%M"), names.join(", "));
    if changes.len() > 3 {
        message.push_str(&format!(" +{} more", changes.len() - 3));
    }
    message
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Commit every change in `project` and push it.
///
/// `message` defaults to [`commit_message`] at the local time.
pub fn push(
    git: &Git,
    project: &ResolvedProject,
    message: Option<&str>,
    provisioner: &mut dyn RemoteProvisioner,
) -> SyncResult {
    let dir = project.path.as_path();
    if !mir_core::has_git_metadata(dir) {
        return SyncResult::new(dir, SyncOutcome::NotARepo);
    }

    let changes = match git.status(dir) {
        Ok(changes) => changes,
        Err(e) => {
            return SyncResult::new(dir, SyncOutcome::StatusFailed { error: e.to_string() });
        }
    };
    if changes.is_empty() {
        tracing::debug!("{}: nothing to commit", dir.display());
        return SyncResult::new(dir, SyncOutcome::UpToDate);
    }

    let message = match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => m.to_string(),
        None => commit_message(&changes, chrono::Local::now().naive_local()),
    };
    let mut result = SyncResult {
        changes,
        message: Some(message.clone()),
        ..SyncResult::new(dir, SyncOutcome::UpToDate)
    };

    if let Err(e) = git.stage_all(dir) {
        result.outcome = SyncOutcome::StageFailed { error: e.to_string() };
        return result;
    }
    if let Err(e) = git.commit(dir, &message) {
        result.outcome = SyncOutcome::CommitFailed { error: e.to_string() };
        return result;
    }
    result.commit = git.last_commit_summary(dir).ok();
    tracing::info!("{}: committed {:?}", dir.display(), message);

    let has_origin = match git.has_remote(dir, ORIGIN) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("{}: could not list remotes: {}", dir.display(), e);
            result.outcome = SyncOutcome::CommittedLocally;
            return result;
        }
    };

    if has_origin {
        result.outcome = match git.push(dir) {
            Ok(()) => SyncOutcome::Pushed,
            Err(e) => SyncOutcome::PushFailed { error: e.to_string() },
        };
        return result;
    }

    let repo_name = project.display_name();
    let request = RemoteRequest {
        repo_name: &repo_name,
        local_path: dir,
        description: None,
    };
    let Some(spec) = provisioner.provision(&request) else {
        result.outcome = SyncOutcome::CommittedLocally;
        return result;
    };

    result.outcome = publish(git, dir, &spec);
    result.remote_added = Some(spec);
    result
}

/// Add `spec` as `origin` and push the current branch with upstream
/// tracking.
pub(crate) fn publish(git: &Git, dir: &Path, spec: &RepoSpec) -> SyncOutcome {
    if let Err(e) = git.add_remote(dir, ORIGIN, &spec.clone_url()) {
        return SyncOutcome::PushFailed { error: e.to_string() };
    }
    let branch = git
        .current_branch(dir)
        .ok()
        .flatten()
        .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
    match git.push_upstream(dir, ORIGIN, &branch) {
        Ok(()) => SyncOutcome::RemoteCreated,
        Err(e) => SyncOutcome::PushFailed { error: e.to_string() },
    }
}
