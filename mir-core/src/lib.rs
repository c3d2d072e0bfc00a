//! mir core library: domain types, config persistence and project resolution.
//!
//! Public API surface:
//! - [`types`]: newtypes, records and the ordered [`Registry`]
//! - [`error`]: [`ConfigError`], [`ResolveError`]
//! - [`config`]: load / save of `~/.mir/config.json`
//! - [`resolve`]: map name / path / working directory to one project

pub mod config;
pub mod error;
pub mod resolve;
pub mod types;

pub use error::{ConfigError, ResolveError};
pub use resolve::{has_git_metadata, resolve, Resolution, ResolvedProject};
pub use types::{
    Config, ExtraFields, Identity, ProjectName, ProjectRecord, Registry, WorkspaceSettings,
};
