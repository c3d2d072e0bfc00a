//! New-project pipeline: directory, repository, scaffold files, initial
//! commit, optional remote.
//!
//! The caller registers [`CreateReport::record`] afterwards; this module
//! never writes the config.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use mir_core::{ProjectName, ProjectRecord};
use mir_git::Git;
use mir_scaffold::{ScaffoldContext, Scaffolder, WriteResult};

use crate::error::{io_err, SyncError};
use crate::push::{publish, RemoteProvisioner, RemoteRequest, SyncOutcome};

const DEFAULT_BRANCH: &str = "main";

/// Input for [`create_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: ProjectName,
    pub path: PathBuf,
    pub description: Option<String>,
    pub created: NaiveDate,
}

/// How the remote step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteStep {
    /// No remote was requested or the provisioner declined.
    Local,
    /// `origin` existed or was created, and `push -u origin main` succeeded.
    Pushed { url: String },
    /// The push failed; the project is still usable locally.
    PushFailed { url: String, error: String },
}

/// What [`create_project`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateReport {
    pub record: ProjectRecord,
    /// `git init` ran (the directory was not a repository yet).
    pub initialized: bool,
    pub scaffolded: Vec<WriteResult>,
    /// `false` when there was nothing to commit.
    pub initial_commit: bool,
    pub remote: RemoteStep,
}

/// Run the pipeline.
///
/// Fatal: the directory cannot be created, `git init` fails, or a scaffold
/// file cannot be written. Everything after that is reported in the
/// [`CreateReport`].
pub fn create_project(
    git: &Git,
    scaffolder: &Scaffolder,
    project: &NewProject,
    provisioner: &mut dyn RemoteProvisioner,
) -> Result<CreateReport, SyncError> {
    let dir = project.path.as_path();
    ensure_dir(dir)?;

    let initialized = !mir_core::has_git_metadata(dir);
    if initialized {
        git.init(dir)?;
        git.rename_branch(dir, DEFAULT_BRANCH)?;
        tracing::info!("initialised repository at {}", dir.display());
    }

    let ctx = ScaffoldContext::new(&project.name, project.description.as_deref(), project.created);
    let scaffolded = scaffolder.write_missing(dir, &ctx)?;

    let initial_commit = initial_commit(git, dir, &project.name);

    let mut record = ProjectRecord::new(project.name.clone(), dir.to_path_buf(), project.created);
    record.description = project
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    let remote = remote_step(git, project, provisioner, &mut record);

    Ok(CreateReport {
        record,
        initialized,
        scaffolded,
        initial_commit,
        remote,
    })
}

fn ensure_dir(dir: &Path) -> Result<(), SyncError> {
    if dir.exists() && !dir.is_dir() {
        return Err(SyncError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))
}

fn initial_commit(git: &Git, dir: &Path, name: &ProjectName) -> bool {
    let message = format!("Initial commit: {name}");
    match git.stage_all(dir).and_then(|()| git.commit(dir, &message)) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("initial commit skipped in {}: {}", dir.display(), e);
            false
        }
    }
}

fn remote_step(
    git: &Git,
    project: &NewProject,
    provisioner: &mut dyn RemoteProvisioner,
    record: &mut ProjectRecord,
) -> RemoteStep {
    let dir = project.path.as_path();

    if git.has_remote(dir, "origin").unwrap_or(false) {
        let url = git.remote_url(dir, "origin").unwrap_or_default();
        record.github = Some(web_url(&url));
        return match git.push_upstream(dir, "origin", DEFAULT_BRANCH) {
            Ok(()) => RemoteStep::Pushed { url },
            Err(e) => RemoteStep::PushFailed {
                url,
                error: e.to_string(),
            },
        };
    }

    let request = RemoteRequest {
        repo_name: project.name.as_str(),
        local_path: dir,
        description: project.description.as_deref(),
    };
    let Some(spec) = provisioner.provision(&request) else {
        return RemoteStep::Local;
    };

    record.github = Some(spec.web_url());
    let url = spec.clone_url();
    match publish(git, dir, &spec) {
        SyncOutcome::PushFailed { error } => RemoteStep::PushFailed { url, error },
        _ => RemoteStep::Pushed { url },
    }
}

/// `https://host/owner/name.git` → `https://host/owner/name`.
fn web_url(clone_url: &str) -> String {
    clone_url.trim().trim_end_matches(".git").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_url_strips_git_suffix() {
        assert_eq!(
            web_url("https://github.com/octo/demo.git"),
            "https://github.com/octo/demo"
        );
        assert_eq!(web_url("https://github.com/octo/demo"), "https://github.com/octo/demo");
    }

    #[test]
    fn file_in_the_way_is_rejected() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let file = dir.path().join("taken");
        std::fs::write(&file, "x").expect("write");
        assert!(matches!(
            ensure_dir(&file),
            Err(SyncError::NotADirectory { .. })
        ));
    }
}
