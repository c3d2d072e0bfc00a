//! `mir setup [--username U] [--email E] [--workspace DIR | --no-workspace]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::session::{absolute, Session};
use crate::ui;

/// Configure git identity and the workspace folder.
#[derive(Args, Debug, Default)]
pub struct SetupArgs {
    /// GitHub username, also used as `git config --global user.name`.
    #[arg(long)]
    pub username: Option<String>,

    /// Email for `git config --global user.email`.
    #[arg(long)]
    pub email: Option<String>,

    /// Create every new project inside this folder.
    #[arg(long, value_name = "DIR", conflicts_with = "no_workspace")]
    pub workspace: Option<PathBuf>,

    /// Create new projects wherever `mir new` is run.
    #[arg(long)]
    pub no_workspace: bool,
}

impl SetupArgs {
    pub fn run(self) -> Result<()> {
        let mut session = Session::open()?;
        self.execute(&mut session)
    }

    pub fn execute(self, session: &mut Session) -> Result<()> {
        ui::header("WORKSPACE SETUP");
        if !session.ensure_writable() {
            return Ok(());
        }

        match session.git.version() {
            Ok(version) => ui::ok(format!("Git detected: {version}")),
            Err(e) => {
                ui::err(format!("Git check failed: {e}"));
                return Ok(());
            }
        }

        let saved = session.config.identity.clone();
        let username = match self.username {
            Some(u) => u.trim().to_string(),
            None => ui::ask("GitHub username", saved.username.as_deref())?,
        };
        if username.is_empty() {
            ui::err("A GitHub username is required (pass --username).");
            return Ok(());
        }
        let email = match self.email {
            Some(e) => e.trim().to_string(),
            None => ui::ask("Git email (optional)", saved.email.as_deref())?,
        };
        let email = (!email.is_empty()).then_some(email);

        match session.git.set_global_identity(&username, email.as_deref()) {
            Ok(()) => ui::ok(format!("Git identity set: {username}")),
            Err(e) => ui::warn(format!("Could not set global git identity: {e}")),
        }
        session.config.identity.username = Some(username);
        session.config.identity.email = email;

        let cwd = std::env::current_dir().context("cannot read current directory")?;
        let workspace = &mut session.config.workspace;
        if self.no_workspace {
            workspace.use_workspace = false;
        } else if let Some(dir) = self.workspace {
            workspace.use_workspace = true;
            workspace.workspace = Some(absolute(&cwd, &dir));
        } else if ui::confirm(
            "Keep all projects in one workspace folder?",
            workspace.use_workspace || workspace.workspace.is_none(),
        )? {
            let fallback = workspace
                .workspace
                .clone()
                .or_else(|| dirs::home_dir().map(|h| h.join("Projects")))
                .map(|p| p.display().to_string());
            let answer = ui::ask("Workspace folder", fallback.as_deref())?;
            if answer.is_empty() {
                workspace.use_workspace = false;
            } else {
                workspace.use_workspace = true;
                workspace.workspace = Some(absolute(&cwd, &PathBuf::from(answer)));
            }
        } else {
            workspace.use_workspace = false;
        }

        if let Some(root) = workspace.root() {
            std::fs::create_dir_all(root)
                .with_context(|| format!("cannot create workspace {}", root.display()))?;
            ui::ok(format!("Workspace: {}", root.display()));
        } else {
            ui::info("No workspace: projects are created where you run `mir new`.");
        }

        session.config.setup_complete = true;
        session.save()?;
        ui::ok("Setup complete");
        Ok(())
    }
}
