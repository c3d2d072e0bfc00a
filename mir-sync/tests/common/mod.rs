//! Shared fixtures for git-backed tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Once;

use chrono::NaiveDate;
use mir_core::{ProjectName, ProjectRecord, Registry};
use mir_git::{Git, GitOptions};

static INIT: Once = Once::new();

/// A located git with a commit identity in the environment, or `None` when
/// git is not installed.
pub fn git() -> Option<Git> {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
        for (key, value) in [
            ("GIT_AUTHOR_NAME", "Test User"),
            ("GIT_AUTHOR_EMAIL", "test@example.com"),
            ("GIT_COMMITTER_NAME", "Test User"),
            ("GIT_COMMITTER_EMAIL", "test@example.com"),
        ] {
            std::env::set_var(key, value);
        }
    });
    Git::locate(GitOptions::default()).ok()
}

pub fn sh_git(dir: &Path, args: &[&str]) -> String {
    let out = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("spawn git");
    assert!(
        out.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

pub fn init_repo(dir: &Path) {
    fs::create_dir_all(dir).expect("mkdir");
    sh_git(dir, &["init", "--quiet"]);
    sh_git(dir, &["config", "commit.gpgsign", "false"]);
    sh_git(dir, &["branch", "-M", "main"]);
}

pub fn commit_file(dir: &Path, name: &str, message: &str) {
    fs::write(dir.join(name), format!("{name}\n")).expect("write");
    sh_git(dir, &["add", "-A"]);
    sh_git(dir, &["commit", "--quiet", "-m", message]);
}

/// A bare repository to push into.
pub fn bare_remote(parent: &Path, name: &str) -> PathBuf {
    let path = parent.join(name);
    fs::create_dir_all(&path).expect("mkdir");
    sh_git(&path, &["init", "--quiet", "--bare"]);
    path
}

pub fn record(name: &str, path: impl Into<PathBuf>) -> ProjectRecord {
    ProjectRecord::new(
        ProjectName::from(name),
        path.into(),
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
    )
}

pub fn registry(records: Vec<ProjectRecord>) -> Registry {
    records.into_iter().collect()
}
