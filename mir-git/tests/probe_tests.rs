//! Probe and git-wrapper tests against real repositories.
//!
//! Each test gets an isolated `TempDir`. Tests return early when `git` is
//! not installed.

use std::fs;
use std::path::Path;
use std::process::Command;

use mir_git::{probe, Git, GitOptions, Probe};
use rstest::rstest;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn git() -> Option<Git> {
    Git::locate(GitOptions::default()).ok()
}

fn sh_git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("spawn git");
    assert!(status.success(), "git {args:?} failed");
}

fn init_repo(dir: &Path) {
    sh_git(dir, &["init", "--quiet"]);
    sh_git(dir, &["config", "user.name", "Test User"]);
    sh_git(dir, &["config", "user.email", "test@example.com"]);
    sh_git(dir, &["config", "commit.gpgsign", "false"]);
    sh_git(dir, &["branch", "-M", "main"]);
}

fn commit_file(dir: &Path, name: &str, message: &str) {
    fs::write(dir.join(name), format!("{name}\n")).expect("write");
    sh_git(dir, &["add", "-A"]);
    sh_git(dir, &["commit", "--quiet", "-m", message]);
}

// ---------------------------------------------------------------------------
// Probe
// ---------------------------------------------------------------------------

#[test]
fn plain_directory_is_not_a_repo() {
    let Some(git) = git() else { return };
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("file.txt"), "x").expect("write");
    assert_eq!(probe(&git, dir.path()), Probe::NotARepo);
}

#[test]
fn zero_commit_repo_reports_dirty_and_no_commit() {
    let Some(git) = git() else { return };
    let dir = TempDir::new().expect("tempdir");
    init_repo(dir.path());
    fs::write(dir.path().join("draft.md"), "wip").expect("write");

    let Probe::Repo(status) = probe(&git, dir.path()) else {
        panic!("expected a repository");
    };
    assert_eq!(status.dirty(), Some(true));
    assert_eq!(status.change_count(), Some(1));
    assert_eq!(status.branch.as_deref(), Some("main"));
    assert_eq!(status.last_commit, None);
    assert_eq!(status.last_commit_age, None);
    assert_eq!(status.has_remote, Some(false));
}

#[test]
fn clean_repo_with_history() {
    let Some(git) = git() else { return };
    let dir = TempDir::new().expect("tempdir");
    init_repo(dir.path());
    commit_file(dir.path(), "README.md", "Initial commit: demo");

    let Probe::Repo(status) = probe(&git, dir.path()) else {
        panic!("expected a repository");
    };
    assert_eq!(status.dirty(), Some(false));
    assert_eq!(status.change_count(), Some(0));
    let summary = status.last_commit.expect("last commit");
    assert!(summary.ends_with("Initial commit: demo"), "got: {summary}");
    assert!(status.last_commit_age.is_some());
}

#[test]
fn origin_remote_is_detected() {
    let Some(git) = git() else { return };
    let dir = TempDir::new().expect("tempdir");
    init_repo(dir.path());
    sh_git(dir.path(), &["remote", "add", "origin", "https://example.invalid/x.git"]);

    let Probe::Repo(status) = probe(&git, dir.path()) else {
        panic!("expected a repository");
    };
    assert_eq!(status.has_remote, Some(true));
    assert_eq!(
        git.remote_url(dir.path(), "origin").expect("url"),
        "https://example.invalid/x.git"
    );
}

// ---------------------------------------------------------------------------
// Wrapper commands
// ---------------------------------------------------------------------------

#[rstest]
#[case("plain message")]
#[case("quotes \"double\" and 'single'")]
#[case("shell $HOME `whoami` ; && |")]
fn commit_message_passes_through_verbatim(#[case] message: &str) {
    let Some(git) = git() else { return };
    let dir = TempDir::new().expect("tempdir");
    init_repo(dir.path());
    fs::write(dir.path().join("a.txt"), "a").expect("write");

    git.stage_all(dir.path()).expect("stage");
    git.commit(dir.path(), message).expect("commit");

    let log = git.log(dir.path(), 5).expect("log");
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].subject, message);
    assert_eq!(log[0].author, "Test User");
}

#[test]
fn log_of_empty_repo_is_empty() {
    let Some(git) = git() else { return };
    let dir = TempDir::new().expect("tempdir");
    init_repo(dir.path());
    assert!(git.log(dir.path(), 20).expect("log").is_empty());
    assert!(!git.has_commits(dir.path()).expect("has_commits"));
}

#[test]
fn log_respects_limit_newest_first() {
    let Some(git) = git() else { return };
    let dir = TempDir::new().expect("tempdir");
    init_repo(dir.path());
    for i in 0..4 {
        commit_file(dir.path(), &format!("f{i}.txt"), &format!("commit {i}"));
    }
    let log = git.log(dir.path(), 2).expect("log");
    let subjects: Vec<&str> = log.iter().map(|c| c.subject.as_str()).collect();
    assert_eq!(subjects, ["commit 3", "commit 2"]);
}

#[test]
fn push_without_reachable_remote_fails_with_command_error() {
    let Some(git) = git() else { return };
    let dir = TempDir::new().expect("tempdir");
    init_repo(dir.path());
    commit_file(dir.path(), "a.txt", "one");
    let missing = dir.path().join("no-such-remote.git");
    sh_git(dir.path(), &["remote", "add", "origin", missing.to_str().unwrap()]);

    let err = git.push_upstream(dir.path(), "origin", "main").unwrap_err();
    assert!(err.is_command_failure(), "got: {err}");
}
