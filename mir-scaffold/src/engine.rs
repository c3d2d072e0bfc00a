//! Tera rendering engine: [`ScaffoldFile`], [`TemplateEngine`] and
//! [`Scaffolder`].
//!
//! # Output mapping
//!
//! | File        | Template            | Output path  |
//! |-------------|---------------------|--------------|
//! | Readme      | `readme.md.tera`    | `README.md`  |
//! | Gitignore   | `gitignore.tera`    | `.gitignore` |
//!
//! A `.tera` file of the same name in the user template directory
//! (`~/.mir/templates/`) replaces the embedded default.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use crate::context::ScaffoldContext;
use crate::error::{io_err, ScaffoldError};

// ---------------------------------------------------------------------------
// Embedded templates
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("readme.md.tera", include_str!("templates/readme.md.tera")),
    ("gitignore.tera", include_str!("templates/gitignore.tera")),
];

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, ScaffoldError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut templates = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_lowercase()) else {
            continue;
        };
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        tracing::debug!(template = %name, path = %path.display(), "user template override");
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, ScaffoldError> {
    let mut templates: HashMap<String, String> = TPLS
        .iter()
        .map(|(name, content)| ((*name).to_string(), (*content).to_string()))
        .collect();
    if let Some(dir) = user_template_dir {
        templates.extend(load_user_templates(dir)?);
    }

    let mut tera = Tera::default();
    tera.add_raw_templates(templates.into_iter().collect::<Vec<_>>())?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// ScaffoldFile
// ---------------------------------------------------------------------------

/// Files written into a freshly created project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaffoldFile {
    Readme,
    Gitignore,
}

impl ScaffoldFile {
    /// All files in write order.
    pub fn all() -> &'static [ScaffoldFile] {
        &[ScaffoldFile::Readme, ScaffoldFile::Gitignore]
    }

    pub fn template_name(self) -> &'static str {
        match self {
            ScaffoldFile::Readme => "readme.md.tera",
            ScaffoldFile::Gitignore => "gitignore.tera",
        }
    }

    pub fn output_path(self, project_root: &Path) -> PathBuf {
        match self {
            ScaffoldFile::Readme => project_root.join("README.md"),
            ScaffoldFile::Gitignore => project_root.join(".gitignore"),
        }
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Embedded templates plus optional user overrides.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, ScaffoldError> {
        Ok(TemplateEngine {
            tera: build_tera(user_template_dir)?,
        })
    }

    /// Render one file. Line endings are normalised to LF.
    pub fn render(&self, ctx: &ScaffoldContext, file: ScaffoldFile) -> Result<String, ScaffoldError> {
        let tera_ctx = ctx.to_tera_context()?;
        let rendered = self.tera.render(file.template_name(), &tera_ctx)?;
        Ok(rendered.replace("\r\n", "\n"))
    }
}

// ---------------------------------------------------------------------------
// Scaffolder
// ---------------------------------------------------------------------------

/// Outcome of one scaffold file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    Written { path: PathBuf },
    /// The file already existed and was left untouched.
    Skipped { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path } | WriteResult::Skipped { path } => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }
}

/// Writes README.md and .gitignore into a project root without ever
/// overwriting existing files.
pub struct Scaffolder {
    engine: TemplateEngine,
}

impl Scaffolder {
    /// Embedded templates only.
    pub fn new() -> Result<Self, ScaffoldError> {
        Self::with_overrides(None)
    }

    pub fn with_overrides(user_template_dir: Option<&Path>) -> Result<Self, ScaffoldError> {
        Ok(Scaffolder {
            engine: TemplateEngine::new(user_template_dir)?,
        })
    }

    /// Render and write every [`ScaffoldFile`] that does not exist yet.
    pub fn write_missing(
        &self,
        project_root: &Path,
        ctx: &ScaffoldContext,
    ) -> Result<Vec<WriteResult>, ScaffoldError> {
        let mut results = Vec::with_capacity(ScaffoldFile::all().len());
        for file in ScaffoldFile::all() {
            let path = file.output_path(project_root);
            if path.exists() {
                tracing::debug!(path = %path.display(), "exists, not overwriting");
                results.push(WriteResult::Skipped { path });
                continue;
            }
            let content = self.engine.render(ctx, *file)?;
            write_new(&path, &content)?;
            tracing::info!(path = %path.display(), "wrote scaffold file");
            results.push(WriteResult::Written { path });
        }
        Ok(results)
    }
}

/// Write via a `.mir.tmp` sibling and rename into place.
fn write_new(path: &Path, content: &str) -> Result<(), ScaffoldError> {
    let tmp = PathBuf::from(format!("{}.mir.tmp", path.display()));
    std::fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
