//! # mir-git
//!
//! Everything that shells out: locating `git`/`gh`, running them with a
//! time limit, and turning their output into typed values.
//!
//! Call [`probe`] to get a [`RepoStatus`] for a directory, or use the [`Git`]
//! methods directly for individual commands.

mod cmd;
pub mod error;
pub mod git;
pub mod history;
pub mod hosting;
pub mod locate;
pub mod probe;

pub use error::GitError;
pub use git::{Git, GitOptions};
pub use history::CommitEntry;
pub use hosting::{CreateOutcome, GhCli, RepoSpec, Visibility};
pub use locate::locate;
pub use probe::{probe, ChangedEntry, Probe, RepoStatus};
