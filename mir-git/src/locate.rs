//! Executable discovery.
//!
//! PATH lookup first, then fixed install locations for the current platform.
//! Everything above this module only ever sees `Result<PathBuf, GitError>`.

use std::path::PathBuf;

use crate::error::GitError;

/// Find `tool` (e.g. `"git"`, `"gh"`) on this machine.
pub fn locate(tool: &str) -> Result<PathBuf, GitError> {
    if let Ok(path) = which::which(tool) {
        tracing::debug!(tool, path = %path.display(), "found on PATH");
        return Ok(path);
    }

    for candidate in install_locations(tool) {
        if candidate.is_file() {
            tracing::debug!(tool, path = %candidate.display(), "found in install location");
            return Ok(candidate);
        }
    }

    Err(GitError::NotFound {
        tool: tool.to_string(),
    })
}

/// Where installers put `tool` when they do not touch PATH.
#[cfg(windows)]
fn install_locations(tool: &str) -> Vec<PathBuf> {
    let exe = format!("{tool}.exe");
    let mut dirs: Vec<PathBuf> = Vec::new();
    match tool {
        "git" => {
            for base in [r"C:\Program Files\Git", r"C:\Program Files (x86)\Git"] {
                dirs.push(PathBuf::from(base).join("bin"));
                dirs.push(PathBuf::from(base).join("cmd"));
            }
            if let Some(local) = dirs::data_local_dir() {
                dirs.push(local.join("Programs").join("Git").join("bin"));
            }
        }
        "gh" => {
            dirs.push(PathBuf::from(r"C:\Program Files\GitHub CLI"));
        }
        _ => {}
    }
    if let Some(home) = dirs::home_dir() {
        dirs.push(home.join("scoop").join("shims"));
    }
    dirs.into_iter().map(|d| d.join(&exe)).collect()
}

#[cfg(not(windows))]
fn install_locations(tool: &str) -> Vec<PathBuf> {
    ["/usr/local/bin", "/opt/homebrew/bin", "/usr/bin"]
        .iter()
        .map(|d| PathBuf::from(d).join(tool))
        .collect()
}
