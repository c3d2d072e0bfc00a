//! `mir log [--project N] [--path P] [--limit 20]`

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use mir_git::history::truncate;

use crate::session::Session;
use crate::ui;

const SUBJECT_WIDTH: usize = 44;

/// Show recent commits of one project.
#[derive(Args, Debug)]
pub struct LogArgs {
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Number of commits to show.
    #[arg(long, short = 'n', default_value_t = 20)]
    pub limit: usize,
}

impl Default for LogArgs {
    fn default() -> Self {
        Self {
            project: None,
            path: None,
            limit: 20,
        }
    }
}

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "hash")]
    hash: String,
    #[tabled(rename = "date")]
    date: String,
    #[tabled(rename = "message")]
    subject: String,
    #[tabled(rename = "author")]
    author: String,
    #[tabled(rename = "when")]
    when: String,
}

impl LogArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open()?;
        self.execute(&session)
    }

    pub fn execute(self, session: &Session) -> Result<()> {
        let Some(project) = session.resolve(self.project.as_deref(), self.path.as_deref())? else {
            return Ok(());
        };
        ui::header(&format!("HISTORY: {}", project.display_name()));

        if !mir_core::has_git_metadata(&project.path) {
            ui::err(format!("No git repo at: {}", project.path.display()));
            return Ok(());
        }
        let commits = match session.git.log(&project.path, self.limit) {
            Ok(commits) => commits,
            Err(e) => {
                ui::err(format!("Could not read history: {e}"));
                return Ok(());
            }
        };
        if commits.is_empty() {
            ui::info("No commits yet.");
            return Ok(());
        }

        let rows: Vec<LogRow> = commits
            .into_iter()
            .map(|c| LogRow {
                hash: c.hash,
                date: c.date,
                subject: truncate(&c.subject, SUBJECT_WIDTH),
                author: c.author,
                when: c.relative,
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
