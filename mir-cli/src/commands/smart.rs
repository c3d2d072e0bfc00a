//! `mir` with no subcommand: first-run setup, then a menu.

use anyhow::{Context, Result};

use mir_git::{probe, Probe};

use super::{
    log::LogArgs, new::NewArgs, projects, push::PushArgs, setup::SetupArgs, status::StatusArgs,
};
use crate::session::Session;
use crate::ui;

#[derive(Clone, Copy)]
enum Action {
    PushHere,
    New,
    Status,
    Log,
    Projects,
    Setup,
    Quit,
}

pub fn run() -> Result<()> {
    let mut session = Session::open()?;

    if !session.config.setup_complete {
        if !ui::interactive() {
            ui::info("First run: configure mir with `mir setup --username <name>`.");
            return Ok(());
        }
        ui::info("First run detected, starting setup.");
        SetupArgs::default().execute(&mut session)?;
        return Ok(());
    }

    let cwd = std::env::current_dir().context("cannot read current directory")?;
    let dirty_here = match probe(&session.git, &cwd) {
        Probe::Repo(status) => status.dirty() == Some(true),
        Probe::NotARepo => false,
    };

    let mut actions = Vec::new();
    if dirty_here {
        actions.push((Action::PushHere, format!("Push changes in {}", cwd.display())));
    }
    actions.extend([
        (Action::New, "New project".to_string()),
        (Action::Status, "Status of all projects".to_string()),
        (Action::Log, "History of a project".to_string()),
        (Action::Projects, "List projects".to_string()),
        (Action::Setup, "Reconfigure".to_string()),
        (Action::Quit, "Quit".to_string()),
    ]);
    let labels: Vec<String> = actions.iter().map(|(_, label)| label.clone()).collect();

    let Some(choice) = ui::choose("What would you like to do?", &labels)? else {
        // Scripted run: show the overview and stop.
        return StatusArgs::default().execute(&session);
    };

    match actions[choice].0 {
        Action::PushHere => PushArgs {
            path: Some(cwd),
            ..PushArgs::default()
        }
        .execute(&mut session),
        Action::New => NewArgs::default().execute(&mut session),
        Action::Status => StatusArgs::default().execute(&session),
        Action::Log => match pick_project(&session)? {
            Some(project) => LogArgs {
                project: Some(project),
                ..LogArgs::default()
            }
            .execute(&session),
            None => {
                projects::print_table(&session.config.projects);
                Ok(())
            }
        },
        Action::Projects => {
            projects::print_table(&session.config.projects);
            Ok(())
        }
        Action::Setup => SetupArgs::default().execute(&mut session),
        Action::Quit => Ok(()),
    }
}

/// Let the user pick a registered project by name.
fn pick_project(session: &Session) -> Result<Option<String>> {
    let names: Vec<String> = session
        .config
        .projects
        .sorted()
        .into_iter()
        .map(|r| r.name.to_string())
        .collect();
    Ok(ui::choose("Project", &names)?.map(|i| names[i].clone()))
}
