//! `mir new <name> [--description D] [--path DIR] [--local] [--private|--public]`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use mir_core::{config, ProjectName};
use mir_git::{GhCli, Visibility};
use mir_scaffold::Scaffolder;
use mir_sync::{create_project, NewProject, RemoteStep, StayLocal};

use super::setup::SetupArgs;
use crate::remote::GhProvisioner;
use crate::session::{absolute, Session};
use crate::ui;

/// Create a project: folder, repository, README, .gitignore, remote.
#[derive(Args, Debug, Default)]
pub struct NewArgs {
    /// Project name; lowercased, spaces become hyphens.
    pub name: Option<String>,

    /// One-line description for the README and the hosted repository.
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Project folder. Takes precedence over the workspace.
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Do not create a GitHub repository.
    #[arg(long)]
    pub local: bool,

    #[arg(long, conflicts_with = "public")]
    pub private: bool,

    #[arg(long)]
    pub public: bool,
}

impl NewArgs {
    pub fn run(self) -> Result<()> {
        let mut session = Session::open()?;
        self.execute(&mut session)
    }

    pub fn execute(self, session: &mut Session) -> Result<()> {
        ui::header("NEW PROJECT");
        if !session.ensure_writable() {
            return Ok(());
        }
        if !session.config.setup_complete {
            if !ui::interactive() {
                ui::err("Setup has not been run yet. Run: mir setup --username <name>");
                return Ok(());
            }
            SetupArgs::default().execute(session)?;
            if !session.config.setup_complete {
                return Ok(());
            }
        }

        let raw = match self.name {
            Some(name) => name,
            None => ui::ask("Project name", None)?,
        };
        let Some(name) = ProjectName::normalize(&raw) else {
            ui::err("Project name cannot be empty.");
            return Ok(());
        };
        let description = match self.description {
            Some(d) => Some(d),
            None if ui::interactive() => Some(ui::ask("Short description (optional)", None)?),
            None => None,
        }
        .filter(|d| !d.trim().is_empty());

        let cwd = std::env::current_dir().context("cannot read current directory")?;
        let path = match (self.path, session.config.workspace.root()) {
            (Some(dir), _) => absolute(&cwd, &dir),
            (None, Some(root)) => {
                let default = root.join(name.as_str());
                let prompt = format!("Add to your workspace at {}?", root.display());
                if ui::confirm(&prompt, true)? {
                    default
                } else {
                    let dir = ui::ask("Project folder", Some(&default.display().to_string()))?;
                    if dir.is_empty() {
                        default
                    } else {
                        absolute(&cwd, Path::new(&dir))
                    }
                }
            }
            (None, None) => cwd.join(name.as_str()),
        };

        if let Some(existing) = session.config.projects.get(name.as_str()) {
            ui::warn(format!(
                "'{name}' is already registered at {}; the record will be replaced",
                existing.path.display()
            ));
        }

        let sync_github = !self.local && ui::confirm("Create a GitHub repository?", true)?;
        let visibility = if self.public {
            Visibility::Public
        } else if self.private || !sync_github || ui::confirm("Make private?", true)? {
            Visibility::Private
        } else {
            Visibility::Public
        };

        let scaffolder = Scaffolder::with_overrides(Some(config::templates_dir_at(&session.home).as_path()))
            .context("failed to load scaffold templates")?;
        let project = NewProject {
            name: name.clone(),
            path,
            description,
            created: chrono::Local::now().date_naive(),
        };

        let report = if sync_github {
            let gh = GhCli::locate(session.git.options().network_timeout);
            let mut provisioner =
                GhProvisioner::for_new(gh, session.config.identity.username.clone(), visibility);
            create_project(&session.git, &scaffolder, &project, &mut provisioner)
        } else {
            create_project(&session.git, &scaffolder, &project, &mut StayLocal)
        };
        let report = match report {
            Ok(report) => report,
            Err(e) => {
                ui::err(format!("Could not create project: {e}"));
                return Ok(());
            }
        };

        ui::ok(format!("Folder: {}", project.path.display()));
        if report.initialized {
            ui::ok("Git repository initialised (branch main)");
        }
        for file in report.scaffolded.iter().filter(|f| f.is_written()) {
            ui::ok(format!("{} created", file.path().display()));
        }
        if report.initial_commit {
            ui::ok("Initial commit made");
        } else {
            ui::info("Nothing to commit yet");
        }
        match &report.remote {
            RemoteStep::Local => ui::info("Local only, no GitHub remote"),
            RemoteStep::Pushed { url } => ui::ok(format!("Pushed to {url}")),
            RemoteStep::PushFailed { url, error } => {
                ui::warn(format!("Push to {url} failed, you may need to authenticate: {error}"));
                println!(
                    "\n  Try manually:\n    cd {}\n    git push -u origin main\n",
                    project.path.display()
                );
            }
        }

        session.config.projects.insert(report.record);
        session.save()?;
        println!(
            "\n  {} {} is ready at {}",
            "✓".green().bold(),
            name.to_string().bold(),
            project.path.display()
        );
        Ok(())
    }
}
