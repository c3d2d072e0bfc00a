//! Remote repository creation through the GitHub CLI (`gh`).
//!
//! `gh` is optional. When it is missing or fails, callers get
//! [`CreateOutcome::Manual`] with step-by-step instructions instead of an
//! error, and carry on.

use std::path::PathBuf;
use std::time::Duration;

use crate::cmd::Invocation;
use crate::locate::locate;

const TOOL: &str = "gh";

/// Repository visibility on the hosting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    fn flag(self) -> &'static str {
        match self {
            Visibility::Public => "--public",
            Visibility::Private => "--private",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Private => "Private",
        }
    }
}

/// What to create on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    pub owner: String,
    pub name: String,
    pub visibility: Visibility,
    pub description: Option<String>,
}

impl RepoSpec {
    /// `https://github.com/<owner>/<name>.git`, the `origin` URL.
    pub fn clone_url(&self) -> String {
        format!("https://github.com/{}/{}.git", self.owner, self.name)
    }

    /// `https://github.com/<owner>/<name>`, recorded in the registry.
    pub fn web_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }

    /// Arguments for `gh repo create`.
    pub fn create_args(&self) -> Vec<String> {
        let mut args = vec![
            "repo".to_string(),
            "create".to_string(),
            format!("{}/{}", self.owner, self.name),
            self.visibility.flag().to_string(),
        ];
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            args.push("--description".to_string());
            args.push(description.to_string());
        }
        args
    }

    /// Steps for creating the repository by hand in a browser.
    pub fn manual_steps(&self) -> Vec<String> {
        vec![
            "Go to https://github.com/new".to_string(),
            format!("Repository name: {}", self.name),
            format!("Set to {}", self.visibility.label()),
            "Leave everything else UNCHECKED (no README, no .gitignore)".to_string(),
            "Click Create repository".to_string(),
        ]
    }
}

/// How the remote repository came to exist (or will).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// `gh` created it.
    Created,
    /// The user has to create it; `reason` says why `gh` was not used.
    Manual { reason: String },
}

/// The `gh` executable, if present.
#[derive(Debug, Clone)]
pub struct GhCli {
    program: Option<PathBuf>,
    timeout: Duration,
}

impl GhCli {
    /// Look for `gh`; absence is not an error.
    pub fn locate(timeout: Duration) -> Self {
        let program = match locate(TOOL) {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::debug!(error = %err, "gh unavailable, remote creation will be manual");
                None
            }
        };
        Self { program, timeout }
    }

    pub fn with_program(program: Option<PathBuf>, timeout: Duration) -> Self {
        Self { program, timeout }
    }

    pub fn is_available(&self) -> bool {
        self.program.is_some()
    }

    /// Create the repository with `gh repo create`, falling back to
    /// [`CreateOutcome::Manual`] on any failure.
    pub fn create_repo(&self, spec: &RepoSpec) -> CreateOutcome {
        let Some(program) = self.program.as_deref() else {
            return CreateOutcome::Manual {
                reason: "GitHub CLI (gh) is not installed".to_string(),
            };
        };

        let args = spec.create_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let result = Invocation {
            tool: TOOL,
            program,
            args: &args,
            cwd: None,
            envs: &[],
            timeout: self.timeout,
        }
        .run();

        match result {
            Ok(_) => {
                tracing::info!(repo = %spec.web_url(), "created remote repository");
                CreateOutcome::Created
            }
            Err(err) => {
                tracing::warn!(error = %err, "gh repo create failed");
                CreateOutcome::Manual {
                    reason: format!("gh CLI failed: {err}"),
                }
            }
        }
    }
}
