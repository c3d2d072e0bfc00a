//! Typed wrapper over the `git` executable.
//!
//! One method per git invocation the rest of the workspace needs. Every
//! method returns `Result<_, GitError>`; deciding what a failure means (fatal,
//! degraded field, "no commits yet") is left to the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cmd::Invocation;
use crate::error::GitError;
use crate::history::{self, CommitEntry};
use crate::locate::locate;
use crate::probe::ChangedEntry;

const TOOL: &str = "git";

/// Default ceiling for local queries (status, log, commit…).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default ceiling for operations that talk to a remote.
pub const DEFAULT_NETWORK_TIMEOUT: Duration = Duration::from_secs(120);

/// Time limits for git subprocesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GitOptions {
    pub timeout: Duration,
    pub network_timeout: Duration,
}

impl Default for GitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            network_timeout: DEFAULT_NETWORK_TIMEOUT,
        }
    }
}

impl GitOptions {
    /// Defaults, overridden by `MIR_GIT_TIMEOUT_SECS` and
    /// `MIR_PUSH_TIMEOUT_SECS` when set to a positive integer.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Some(secs) = env_secs("MIR_GIT_TIMEOUT_SECS") {
            options.timeout = secs;
        }
        if let Some(secs) = env_secs("MIR_PUSH_TIMEOUT_SECS") {
            options.network_timeout = secs;
        }
        options
    }
}

fn env_secs(key: &str) -> Option<Duration> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            tracing::warn!(key, value = %raw, "ignoring invalid timeout");
            None
        }
    }
}

/// A located git executable plus its time limits.
#[derive(Debug, Clone)]
pub struct Git {
    program: PathBuf,
    options: GitOptions,
}

impl Git {
    /// Find git on this machine.
    pub fn locate(options: GitOptions) -> Result<Self, GitError> {
        Ok(Self::with_program(locate(TOOL)?, options))
    }

    /// Use a specific executable (tests, unusual installs).
    pub fn with_program(program: impl Into<PathBuf>, options: GitOptions) -> Self {
        Self {
            program: program.into(),
            options,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn options(&self) -> GitOptions {
        self.options
    }

    fn run(&self, cwd: Option<&Path>, args: &[&str]) -> Result<String, GitError> {
        Invocation {
            tool: TOOL,
            program: &self.program,
            args,
            cwd,
            envs: &[],
            timeout: self.options.timeout,
        }
        .run()
    }

    fn run_network(&self, cwd: &Path, args: &[&str]) -> Result<String, GitError> {
        Invocation {
            tool: TOOL,
            program: &self.program,
            args,
            cwd: Some(cwd),
            envs: &[("GIT_TERMINAL_PROMPT", "0")],
            timeout: self.options.network_timeout,
        }
        .run()
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    /// `git --version`, e.g. `"git version 2.44.0"`.
    pub fn version(&self) -> Result<String, GitError> {
        Ok(self.run(None, &["--version"])?.trim().to_string())
    }

    /// `git config --global user.name/user.email`.
    pub fn set_global_identity(&self, name: &str, email: Option<&str>) -> Result<(), GitError> {
        self.run(None, &["config", "--global", "user.name", name])?;
        if let Some(email) = email {
            self.run(None, &["config", "--global", "user.email", email])?;
        }
        Ok(())
    }

    /// `git init` in `dir`.
    pub fn init(&self, dir: &Path) -> Result<(), GitError> {
        self.run(Some(dir), &["init"]).map(drop)
    }

    /// `git branch -M <name>`: rename (or create, on an unborn head) the
    /// current branch.
    pub fn rename_branch(&self, dir: &Path, name: &str) -> Result<(), GitError> {
        self.run(Some(dir), &["branch", "-M", name]).map(drop)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// `git status --porcelain`, one entry per changed path.
    pub fn status(&self, dir: &Path) -> Result<Vec<ChangedEntry>, GitError> {
        let out = self.run(Some(dir), &["status", "--porcelain"])?;
        Ok(out.lines().filter_map(ChangedEntry::parse).collect())
    }

    /// `git branch --show-current`. `None` on a detached HEAD.
    pub fn current_branch(&self, dir: &Path) -> Result<Option<String>, GitError> {
        let out = self.run(Some(dir), &["branch", "--show-current"])?;
        let branch = out.trim();
        Ok((!branch.is_empty()).then(|| branch.to_string()))
    }

    /// Whether HEAD points at a commit. `false` for a freshly initialised
    /// repository.
    pub fn has_commits(&self, dir: &Path) -> Result<bool, GitError> {
        match self.run(Some(dir), &["rev-parse", "--verify", "--quiet", "HEAD"]) {
            Ok(_) => Ok(true),
            Err(e) if e.is_command_failure() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Short hash and subject of HEAD, e.g. `"a1b2c3d Fix typo"`.
    pub fn last_commit_summary(&self, dir: &Path) -> Result<String, GitError> {
        Ok(self
            .run(Some(dir), &["log", "-1", "--format=%h %s"])?
            .trim()
            .to_string())
    }

    /// Relative committer date of HEAD, e.g. `"3 days ago"`.
    pub fn last_commit_age(&self, dir: &Path) -> Result<String, GitError> {
        Ok(self
            .run(Some(dir), &["log", "-1", "--format=%cr"])?
            .trim()
            .to_string())
    }

    /// Whether a remote called `name` is configured.
    pub fn has_remote(&self, dir: &Path, name: &str) -> Result<bool, GitError> {
        let out = self.run(Some(dir), &["remote"])?;
        Ok(out.lines().any(|line| line.trim() == name))
    }

    /// `git remote get-url <name>`.
    pub fn remote_url(&self, dir: &Path, name: &str) -> Result<String, GitError> {
        Ok(self
            .run(Some(dir), &["remote", "get-url", name])?
            .trim()
            .to_string())
    }

    /// The last `limit` commits, newest first. Empty for a repository with
    /// no commits.
    pub fn log(&self, dir: &Path, limit: usize) -> Result<Vec<CommitEntry>, GitError> {
        if !self.has_commits(dir)? {
            return Ok(Vec::new());
        }
        let count = format!("-{}", limit.max(1));
        let format = format!("--format={}", history::LOG_FORMAT);
        let out = self.run(Some(dir), &["log", &count, &format, "--date=short"])?;
        Ok(history::parse_log(&out))
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// `git add -A`.
    pub fn stage_all(&self, dir: &Path) -> Result<(), GitError> {
        self.run(Some(dir), &["add", "-A"]).map(drop)
    }

    /// `git commit -m <message>`. The message is passed verbatim as one argv
    /// entry.
    pub fn commit(&self, dir: &Path, message: &str) -> Result<(), GitError> {
        self.run(Some(dir), &["commit", "-m", message]).map(drop)
    }

    /// `git remote add <name> <url>`.
    pub fn add_remote(&self, dir: &Path, name: &str, url: &str) -> Result<(), GitError> {
        self.run(Some(dir), &["remote", "add", name, url]).map(drop)
    }

    /// `git push` to the configured upstream.
    pub fn push(&self, dir: &Path) -> Result<(), GitError> {
        self.run_network(dir, &["push"]).map(drop)
    }

    /// `git push -u <remote> <branch>`.
    pub fn push_upstream(&self, dir: &Path, remote: &str, branch: &str) -> Result<(), GitError> {
        self.run_network(dir, &["push", "-u", remote, branch]).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_bounded() {
        let options = GitOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.network_timeout, Duration::from_secs(120));
    }

    #[test]
    fn missing_program_reports_not_found() {
        let git = Git::with_program("/nonexistent/bin/git", GitOptions::default());
        let err = git.version().unwrap_err();
        assert!(err.is_not_found(), "got: {err}");
    }
}
