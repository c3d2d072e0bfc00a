//! mir: manage a personal set of git projects from one place.
//!
//! # Usage
//!
//! ```text
//! mir                                   smart mode (setup on first run, then a menu)
//! mir setup [--username U] [--email E] [--workspace DIR | --no-workspace]
//! mir new <name> [--description D] [--path DIR] [--local] [--private|--public]
//! mir push [--project N] [--path DIR] [-m MESSAGE]
//! mir log [--project N] [--path DIR] [--limit 20]
//! mir projects
//! mir status [--json]
//! ```

mod commands;
mod remote;
mod session;
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    log::LogArgs, new::NewArgs, projects::ProjectsArgs, push::PushArgs, setup::SetupArgs,
    status::StatusArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "mir",
    version,
    about = "Create, commit, push and check on all your git projects",
    long_about = None,
)]
struct Cli {
    /// Debug logging on stderr (overrides RUST_LOG).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configure git identity and the workspace folder.
    Setup(SetupArgs),

    /// Create a new project (folder, repo, README, .gitignore, GitHub remote).
    New(NewArgs),

    /// Commit and push all changes in a project.
    Push(PushArgs),

    /// Show recent commits of a project.
    Log(LogArgs),

    /// List registered projects.
    Projects(ProjectsArgs),

    /// Show the state of every registered project.
    Status(StatusArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        None => commands::smart::run(),
        Some(Commands::Setup(args)) => args.run(),
        Some(Commands::New(args)) => args.run(),
        Some(Commands::Push(args)) => args.run(),
        Some(Commands::Log(args)) => args.run(),
        Some(Commands::Projects(args)) => args.run(),
        Some(Commands::Status(args)) => args.run(),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
