//! # mir-scaffold
//!
//! Tera templates for the files a new project starts with (`README.md`,
//! `.gitignore`).
//!
//! ```rust,no_run
//! use std::path::Path;
//! use chrono::Local;
//! use mir_core::ProjectName;
//! use mir_scaffold::{ScaffoldContext, Scaffolder};
//!
//! fn scaffold(root: &Path) -> Result<(), mir_scaffold::ScaffoldError> {
//!     let ctx = ScaffoldContext::new(&ProjectName::from("demo"), None, Local::now().date_naive());
//!     for result in Scaffolder::new()?.write_missing(root, &ctx)? {
//!         println!("{}", result.path().display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::ScaffoldContext;
pub use engine::{ScaffoldFile, Scaffolder, TemplateEngine, WriteResult};
pub use error::ScaffoldError;
