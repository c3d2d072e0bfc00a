//! Repository probe: cheap status facts for one directory.
//!
//! Each fact comes from its own git query. A failed query blanks only that
//! field, so one odd repository (no commits, detached HEAD, broken remote
//! config) still produces a usable [`RepoStatus`].

use std::path::Path;

use mir_core::has_git_metadata;
use serde::Serialize;

use crate::error::GitError;
use crate::git::Git;

/// One line of `git status --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedEntry {
    /// Two-letter status code, trimmed (`"M"`, `"??"`, `"A"`, `"RM"`…).
    pub code: String,
    /// Path relative to the repository root. For renames, the new path.
    pub path: String,
}

impl ChangedEntry {
    /// Parse a porcelain v1 line (`XY path` or `XY old -> new`).
    ///
    /// Quoted paths are unquoted and their C-style escapes decoded. Only
    /// rename and copy entries are split on ` -> `.
    pub fn parse(line: &str) -> Option<Self> {
        if line.len() < 4 || !line.is_char_boundary(3) {
            return None;
        }
        let (code, rest) = line.split_at(3);
        let code = code.trim();
        let rest = rest.trim_end();

        let path = if code.contains(&['R', 'C'][..]) {
            let (_, after) = path_token(rest, true)?;
            let target = after.strip_prefix(" -> ")?;
            path_token(target, false)?.0
        } else {
            path_token(rest, false)?.0
        };
        if path.is_empty() {
            return None;
        }
        Some(Self {
            code: code.to_string(),
            path,
        })
    }

    pub fn is_added(&self) -> bool {
        self.code.contains('A') || self.code == "??"
    }

    pub fn is_modified(&self) -> bool {
        self.code.contains('M')
    }
}

/// Read one path from the start of `s`, returning it and the unread rest.
///
/// A quoted path ends at its closing quote. An unquoted one runs to the end,
/// or to the first ` -> ` when `arrow` is set.
fn path_token(s: &str, arrow: bool) -> Option<(String, &str)> {
    let Some(quoted) = s.strip_prefix('"') else {
        return Some(match s.split_once(" -> ").filter(|_| arrow) {
            Some((path, _)) => (path.to_string(), &s[path.len()..]),
            None => (s.to_string(), ""),
        });
    };

    let mut bytes = Vec::new();
    let mut iter = quoted.char_indices();
    while let Some((i, c)) = iter.next() {
        match c {
            '"' => {
                let path = String::from_utf8_lossy(&bytes).into_owned();
                return Some((path, &quoted[i + 1..]));
            }
            '\\' => {
                let (_, esc) = iter.next()?;
                match esc {
                    'n' => bytes.push(b'\n'),
                    't' => bytes.push(b'\t'),
                    'r' => bytes.push(b'\r'),
                    'a' => bytes.push(0x07),
                    'b' => bytes.push(0x08),
                    'f' => bytes.push(0x0c),
                    'v' => bytes.push(0x0b),
                    '0'..='7' => {
                        let mut value = esc.to_digit(8)?;
                        for _ in 0..2 {
                            let (_, d) = iter.next()?;
                            value = value * 8 + d.to_digit(8)?;
                        }
                        bytes.push(u8::try_from(value).ok()?);
                    }
                    other => {
                        let mut buf = [0u8; 4];
                        bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
                    }
                }
            }
            other => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    None
}

/// Status facts for a confirmed git repository.
///
/// `None` always means "could not be determined", never "zero"/"clean".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoStatus {
    /// Working-tree changes; `None` when the status query failed.
    pub changes: Option<Vec<ChangedEntry>>,
    /// Current branch; `None` on detached HEAD or query failure.
    pub branch: Option<String>,
    /// `"<short hash> <subject>"` of HEAD; `None` before the first commit.
    pub last_commit: Option<String>,
    /// Relative age of HEAD; `None` before the first commit.
    pub last_commit_age: Option<String>,
    /// Whether an `origin` remote exists; `None` when the query failed.
    pub has_remote: Option<bool>,
}

impl RepoStatus {
    pub fn dirty(&self) -> Option<bool> {
        self.changes.as_ref().map(|c| !c.is_empty())
    }

    pub fn change_count(&self) -> Option<usize> {
        self.changes.as_ref().map(Vec::len)
    }
}

/// Result of probing one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// No git metadata at the path. No subprocess was started.
    NotARepo,
    Repo(RepoStatus),
}

/// Probe `path`. Never fails: individual query failures degrade to `None`.
pub fn probe(git: &Git, path: &Path) -> Probe {
    if !has_git_metadata(path) {
        return Probe::NotARepo;
    }

    Probe::Repo(RepoStatus {
        changes: field(path, "status", git.status(path)),
        branch: field(path, "branch", git.current_branch(path)).flatten(),
        last_commit: field(path, "last_commit", git.last_commit_summary(path)),
        last_commit_age: field(path, "last_commit_age", git.last_commit_age(path)),
        has_remote: field(path, "remote", git.has_remote(path, "origin")),
    })
}

fn field<T>(path: &Path, name: &str, result: Result<T, GitError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(path = %path.display(), field = name, error = %err, "probe query failed");
            None
        }
    }
}
