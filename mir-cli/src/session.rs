//! Per-invocation state: home directory, located git, and the config
//! loaded once at the start of a command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use mir_core::{config, resolve, Config, ResolveError, ResolvedProject};
use mir_git::{Git, GitOptions};

use crate::commands::projects;
use crate::ui;

pub struct Session {
    pub home: PathBuf,
    pub git: Git,
    pub config: Config,
    /// `false` when the config file exists but could not be read; saving
    /// would destroy it.
    writable: bool,
}

impl Session {
    /// Locate git (the only fatal failure) and load the config, falling
    /// back to an empty one when the file is unreadable.
    pub fn open() -> Result<Self> {
        let git = locate_git()?;
        let home = dirs::home_dir().context("could not determine home directory")?;
        let (config, writable) = match config::load_at(&home) {
            Ok(config) => (config, true),
            Err(e) => {
                ui::warn(format!("could not read config, continuing with an empty one: {e}"));
                (Config::default(), false)
            }
        };
        tracing::debug!(home = %home.display(), projects = config.projects.len(), writable, "session opened");
        Ok(Self {
            home,
            git,
            config,
            writable,
        })
    }

    pub fn writable(&self) -> bool {
        self.writable
    }

    /// Report and return `false` when the config must not be written.
    pub fn ensure_writable(&self) -> bool {
        if !self.writable {
            ui::err(format!(
                "{} is unreadable; fix or remove it before making changes",
                config::config_path_at(&self.home).display()
            ));
        }
        self.writable
    }

    pub fn save(&self) -> Result<()> {
        if !self.writable {
            anyhow::bail!("config file is unreadable, not overwriting it");
        }
        config::save_at(&self.home, &self.config).context("failed to save config")
    }

    /// Resolve the target project. On failure, print why plus the
    /// registered projects and return `None`.
    pub fn resolve(&self, name: Option<&str>, path: Option<&Path>) -> Result<Option<ResolvedProject>> {
        let cwd = std::env::current_dir().context("cannot read current directory")?;
        let path = path.map(|p| absolute(&cwd, p));
        match resolve(&self.config.projects, name, path.as_deref(), &cwd) {
            Ok(project) => Ok(Some(project)),
            Err(e) => {
                ui::err(&e);
                if matches!(e, ResolveError::CannotDetermine { .. }) {
                    ui::info("Run from inside a project folder, or use: --project <name>");
                }
                projects::print_table(&self.config.projects);
                Ok(None)
            }
        }
    }
}

fn locate_git() -> Result<Git> {
    Git::locate(GitOptions::from_env()).context(
        "Git is required but was not found.\n  \
         Install it from https://git-scm.com/downloads, make sure it is on PATH, \
         then open a new terminal.",
    )
}

/// `path` joined onto `cwd` when relative, canonicalised when it exists.
pub fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    joined.canonicalize().unwrap_or(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn relative_paths_join_cwd() {
        let cwd = Path::new("/definitely/not/here");
        assert_eq!(absolute(cwd, Path::new("x")), PathBuf::from("/definitely/not/here/x"));
    }

    #[test]
    fn existing_paths_are_canonical() {
        let dir = TempDir::new().unwrap();
        let got = absolute(dir.path(), Path::new("."));
        assert_eq!(got, dir.path().canonicalize().unwrap());
    }
}
