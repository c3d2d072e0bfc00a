//! # mir-sync
//!
//! Workflows built on the git wrapper:
//!
//! - [`aggregate`]: status of every registered project, sorted by name.
//! - [`push`]: stage, commit and push one project.
//! - [`create_project`]: set up a brand-new project.
//!
//! None of them write the config; callers persist results once at the end
//! of a command.

pub mod create;
pub mod error;
pub mod push;
pub mod status;

pub use create::{create_project, CreateReport, NewProject, RemoteStep};
pub use error::SyncError;
pub use push::{
    commit_message, push, RemoteProvisioner, RemoteRequest, StayLocal, SyncOutcome, SyncResult,
};
pub use status::{aggregate, Outcome, StatusEntry, Summary};
