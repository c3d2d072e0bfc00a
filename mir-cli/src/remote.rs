//! Interactive remote creation backed by the GitHub CLI.

use mir_git::{CreateOutcome, GhCli, RepoSpec, Visibility};
use mir_sync::{RemoteProvisioner, RemoteRequest};

use crate::ui;

/// Creates the hosted repository with `gh`, or walks the user through
/// doing it by hand.
pub struct GhProvisioner {
    gh: GhCli,
    owner: Option<String>,
    visibility: Option<Visibility>,
    /// Ask before doing anything (push flow) instead of assuming yes (new
    /// project flow).
    ask_first: bool,
}

impl GhProvisioner {
    /// For `mir new`: the user already asked for a remote.
    pub fn for_new(gh: GhCli, owner: Option<String>, visibility: Visibility) -> Self {
        Self {
            gh,
            owner,
            visibility: Some(visibility),
            ask_first: false,
        }
    }

    /// For `mir push`: offer to create a remote when none exists.
    pub fn offer(gh: GhCli, owner: Option<String>) -> Self {
        Self {
            gh,
            owner,
            visibility: None,
            ask_first: true,
        }
    }

    fn spec(&self, request: &RemoteRequest<'_>) -> anyhow::Result<Option<RepoSpec>> {
        if self.ask_first
            && !ui::confirm("Would you like to add a GitHub remote now?", false)?
        {
            return Ok(None);
        }

        let owner = match self.owner.as_deref().filter(|o| !o.is_empty()) {
            Some(owner) => owner.to_string(),
            None => ui::ask("GitHub username", None)?,
        };
        if owner.is_empty() {
            ui::warn("No GitHub username configured; run `mir setup` to add one.");
            return Ok(None);
        }

        let name = if self.ask_first {
            ui::ask("GitHub repo name", Some(request.repo_name))?
        } else {
            request.repo_name.to_string()
        };
        let name = if name.is_empty() {
            request.repo_name.to_string()
        } else {
            name
        };

        let visibility = match self.visibility {
            Some(v) => v,
            None if ui::confirm("Make private?", true)? => Visibility::Private,
            None => Visibility::Public,
        };

        Ok(Some(RepoSpec {
            owner,
            name,
            visibility,
            description: request.description.map(str::to_string),
        }))
    }
}

impl RemoteProvisioner for GhProvisioner {
    fn provision(&mut self, request: &RemoteRequest<'_>) -> Option<RepoSpec> {
        let spec = match self.spec(request) {
            Ok(Some(spec)) => spec,
            Ok(None) => return None,
            Err(e) => {
                ui::err(format!("prompt failed: {e}"));
                return None;
            }
        };

        match self.gh.create_repo(&spec) {
            CreateOutcome::Created => ui::ok(format!("GitHub repo created: {}", spec.web_url())),
            CreateOutcome::Manual { reason } => {
                ui::warn(reason);
                println!("\n  Create the repository manually:");
                for (i, step) in spec.manual_steps().iter().enumerate() {
                    println!("    {}. {step}", i + 1);
                }
                if let Err(e) = ui::pause("Press Enter once the repository exists") {
                    ui::err(format!("prompt failed: {e}"));
                    return None;
                }
            }
        }
        Some(spec)
    }
}
