//! `mir projects`

use anyhow::Result;
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use mir_core::Registry;

use crate::session::Session;

/// List registered projects.
#[derive(Args, Debug, Default)]
pub struct ProjectsArgs {}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "project")]
    name: String,
    #[tabled(rename = "path")]
    path: String,
    #[tabled(rename = "github")]
    github: String,
    #[tabled(rename = "on disk")]
    present: &'static str,
}

impl ProjectsArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open()?;
        print_table(&session.config.projects);
        Ok(())
    }
}

/// Registered projects sorted by name, or a hint when there are none.
pub fn print_table(registry: &Registry) {
    if registry.is_empty() {
        println!("No projects registered yet.");
        println!("Run: mir new <name>");
        return;
    }

    let rows: Vec<ProjectRow> = registry
        .sorted()
        .into_iter()
        .map(|record| ProjectRow {
            name: record.name.to_string(),
            path: record.path.display().to_string(),
            github: record
                .github
                .clone()
                .unwrap_or_else(|| "local only".to_string()),
            present: if record.path.exists() { "✓" } else { "✗ missing" },
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
