//! Rendering payload for scaffold templates.

use chrono::NaiveDate;
use serde::Serialize;

use mir_core::ProjectName;

use crate::error::ScaffoldError;

/// Values available to `readme.md.tera` and `gitignore.tera`.
///
/// | Variable      | Example          |
/// |---------------|------------------|
/// | `name`        | `my-tool`        |
/// | `description` | `null` or string |
/// | `created`     | `2024-03-01`     |
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldContext {
    pub name: String,
    /// Blank descriptions are stored as `None` so templates can test it directly.
    pub description: Option<String>,
    pub created: String,
}

impl ScaffoldContext {
    pub fn new(name: &ProjectName, description: Option<&str>, created: NaiveDate) -> Self {
        Self {
            name: name.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            created: created.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn to_tera_context(&self) -> Result<tera::Context, ScaffoldError> {
        tera::Context::from_serialize(self).map_err(ScaffoldError::from)
    }
}
