//! `mir push [--project N] [--path P] [-m MESSAGE]`

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use mir_git::GhCli;
use mir_sync::{commit_message, push, SyncOutcome, SyncResult};

use crate::remote::GhProvisioner;
use crate::session::Session;
use crate::ui;

/// Stage, commit and push every change in one project.
#[derive(Args, Debug, Default)]
pub struct PushArgs {
    /// Registered project name.
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Project folder (takes precedence over --project).
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Commit message; a summary of the changed files when omitted.
    #[arg(long, short = 'm')]
    pub message: Option<String>,
}

impl PushArgs {
    pub fn run(self) -> Result<()> {
        let mut session = Session::open()?;
        self.execute(&mut session)
    }

    pub fn execute(self, session: &mut Session) -> Result<()> {
        ui::header("PUSH CHANGES");
        let Some(project) = session.resolve(self.project.as_deref(), self.path.as_deref())? else {
            return Ok(());
        };
        ui::info(format!("Project: {}", project.display_name()));

        // Show what will be committed and offer to edit the message.
        let mut message = self.message;
        if mir_core::has_git_metadata(&project.path) {
            if let Ok(changes) = session.git.status(&project.path) {
                if !changes.is_empty() {
                    println!("\n  {}", "Changed files:".bold());
                    for change in &changes {
                        let code = if change.is_added() {
                            change.code.green()
                        } else if change.is_modified() {
                            change.code.yellow()
                        } else {
                            change.code.red()
                        };
                        println!("    {code:>2}  {}", change.path);
                    }
                    if message.is_none() && ui::interactive() {
                        let suggested = commit_message(&changes, chrono::Local::now().naive_local());
                        message = Some(ui::ask("Commit message", Some(&suggested))?);
                    }
                }
            }
        }

        let gh = GhCli::locate(session.git.options().network_timeout);
        let mut provisioner = GhProvisioner::offer(gh, session.config.identity.username.clone());
        let result = push(&session.git, &project, message.as_deref(), &mut provisioner);
        report(&result);

        if let (Some(spec), Some(name)) = (&result.remote_added, &project.name) {
            if let Some(record) = session.config.projects.get_mut(name.as_str()) {
                record.github = Some(spec.web_url());
                if session.writable() {
                    session.save()?;
                    ui::ok(format!("Recorded remote for '{name}'"));
                } else {
                    ui::warn("Config unreadable, remote URL not recorded");
                }
            }
        }

        if let Ok(Some(latest)) = session.git.log(&project.path, 1).map(|l| l.into_iter().next()) {
            ui::dim(format!(
                "Latest: {}  {}  ({})",
                latest.hash, latest.subject, latest.relative
            ));
        }
        Ok(())
    }
}

fn report(result: &SyncResult) {
    let path = result.project_path.display();
    if result.outcome.committed() {
        if let Some(message) = &result.message {
            ui::ok(format!("Committed: {message}"));
        }
    }
    match &result.outcome {
        SyncOutcome::NotARepo => {
            ui::err(format!("No git repo at: {path}"));
            ui::info("Create one with `mir new` or `git init`.");
        }
        SyncOutcome::StatusFailed { error } => ui::err(format!("Could not read status: {error}")),
        SyncOutcome::UpToDate => ui::ok("Nothing to commit, already up to date."),
        SyncOutcome::StageFailed { error } => ui::err(format!("Staging failed: {error}")),
        SyncOutcome::CommitFailed { error } => ui::err(format!("Commit failed: {error}")),
        SyncOutcome::Pushed => ui::ok("Pushed to GitHub!"),
        SyncOutcome::PushFailed { error } => {
            ui::warn(format!("Push failed: {error}"));
            ui::info(format!(
                "Your commit is saved locally. Retry with:  cd {path} && git push"
            ));
        }
        SyncOutcome::CommittedLocally => ui::info("No remote configured, committed locally only."),
        SyncOutcome::RemoteCreated => {
            if let Some(spec) = &result.remote_added {
                ui::ok(format!("Remote set: {}", spec.clone_url()));
            }
            ui::ok("Pushed to GitHub!");
        }
    }
}
