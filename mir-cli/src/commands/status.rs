//! `mir status`: one line per registered project.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use mir_sync::{aggregate, Outcome, StatusEntry, Summary};

use crate::session::Session;

/// Arguments for `mir status`.
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open()?;
        self.execute(&session)
    }

    pub fn execute(self, session: &Session) -> Result<()> {
        let entries = aggregate(&session.git, &session.config.projects);
        let summary = Summary::of(&entries);
        if self.json {
            return print_json(&entries, summary);
        }
        print_table(&entries, summary);
        Ok(())
    }
}

#[derive(Serialize)]
struct StatusReportJson {
    summary: SummaryJson,
    projects: Vec<EntryJson>,
}

#[derive(Serialize)]
struct SummaryJson {
    projects: usize,
    dirty: usize,
    missing: usize,
}

#[derive(Serialize)]
struct EntryJson {
    name: String,
    path: String,
    state: &'static str,
    changes: Option<usize>,
    branch: Option<String>,
    last_commit: Option<String>,
    last_commit_age: Option<String>,
    has_remote: Option<bool>,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "project")]
    name: String,
    #[tabled(rename = "state")]
    state: String,
    #[tabled(rename = "branch")]
    branch: String,
    #[tabled(rename = "remote")]
    remote: &'static str,
    #[tabled(rename = "last commit")]
    last_commit: String,
}

fn state_key(entry: &StatusEntry) -> &'static str {
    match &entry.outcome {
        Outcome::MissingPath => "missing",
        Outcome::NotARepo => "not_a_repo",
        Outcome::Repo(status) => match status.dirty() {
            Some(true) => "dirty",
            Some(false) => "clean",
            None => "unknown",
        },
    }
}

fn state_label(entry: &StatusEntry) -> String {
    match &entry.outcome {
        Outcome::MissingPath => "missing".to_string(),
        Outcome::NotARepo => "not a repo".to_string(),
        Outcome::Repo(status) => match status.change_count() {
            Some(0) => "clean".to_string(),
            Some(1) => "1 change".to_string(),
            Some(n) => format!("{n} changes"),
            None => "status error".to_string(),
        },
    }
}

fn print_json(entries: &[StatusEntry], summary: Summary) -> Result<()> {
    let payload = StatusReportJson {
        summary: SummaryJson {
            projects: summary.projects,
            dirty: summary.dirty,
            missing: summary.missing,
        },
        projects: entries
            .iter()
            .map(|entry| {
                let status = match &entry.outcome {
                    Outcome::Repo(status) => Some(status),
                    _ => None,
                };
                EntryJson {
                    name: entry.name.to_string(),
                    path: entry.path.display().to_string(),
                    state: state_key(entry),
                    changes: status.and_then(|s| s.change_count()),
                    branch: status.and_then(|s| s.branch.clone()),
                    last_commit: status.and_then(|s| s.last_commit.clone()),
                    last_commit_age: status.and_then(|s| s.last_commit_age.clone()),
                    has_remote: status.and_then(|s| s.has_remote),
                }
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(entries: &[StatusEntry], summary: Summary) {
    println!(
        "mir v{} | {} projects | {} with changes | {} missing",
        env!("CARGO_PKG_VERSION"),
        summary.projects,
        summary.dirty,
        summary.missing,
    );
    if entries.is_empty() {
        println!("No projects registered yet.");
        println!("Run: mir new <name>");
        return;
    }

    let rows: Vec<StatusTableRow> = entries
        .iter()
        .map(|entry| {
            let status = match &entry.outcome {
                Outcome::Repo(status) => Some(status),
                _ => None,
            };
            StatusTableRow {
                name: entry.name.to_string(),
                state: state_label(entry),
                branch: status
                    .and_then(|s| s.branch.clone())
                    .unwrap_or_else(|| "-".to_string()),
                remote: match status.and_then(|s| s.has_remote) {
                    Some(true) => "origin",
                    Some(false) => "local",
                    None => "-",
                },
                last_commit: status
                    .and_then(|s| s.last_commit_age.clone())
                    .unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if summary.dirty > 0 {
        println!(
            "{}",
            format!("{} project(s) with uncommitted changes; run `mir push --project <name>`.", summary.dirty)
                .yellow()
        );
    }
    for entry in entries.iter().filter(|e| e.is_missing()) {
        println!(
            "{}",
            format!("'{}' is missing at {}", entry.name, entry.path.display()).red()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mir_core::ProjectName;
    use mir_git::RepoStatus;
    use std::path::PathBuf;

    fn entry(outcome: Outcome) -> StatusEntry {
        StatusEntry {
            name: ProjectName::from("x"),
            path: PathBuf::from("/x"),
            outcome,
        }
    }

    #[test]
    fn unknown_status_is_flagged() {
        let e = entry(Outcome::Repo(RepoStatus::default()));
        assert_eq!(state_key(&e), "unknown");
        assert_eq!(state_label(&e), "status error");
    }

    #[test]
    fn change_counts_are_labelled() {
        let status = RepoStatus {
            changes: Some(vec![]),
            ..RepoStatus::default()
        };
        assert_eq!(state_label(&entry(Outcome::Repo(status))), "clean");
        assert_eq!(state_label(&entry(Outcome::MissingPath)), "missing");
        assert_eq!(state_key(&entry(Outcome::NotARepo)), "not_a_repo");
    }
}
