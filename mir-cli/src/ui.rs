//! Terminal output and prompts.
//!
//! Prompts only appear when both stdin and stdout are terminals; otherwise
//! they answer with their default so scripted runs never block.

use std::fmt::Display;
use std::io::IsTerminal;

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

pub fn ok(msg: impl Display) {
    println!("  {} {msg}", "✓".green().bold());
}

pub fn info(msg: impl Display) {
    println!("  {} {msg}", "·".cyan());
}

pub fn warn(msg: impl Display) {
    eprintln!("  {}  {msg}", "⚠".yellow().bold());
}

pub fn err(msg: impl Display) {
    eprintln!("  {} {msg}", "✗".red().bold());
}

pub fn dim(msg: impl Display) {
    println!("  {}", msg.to_string().dimmed());
}

pub fn header(text: &str) {
    println!("\n{}", text.bold().underline());
}

pub fn interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Free-text answer. Blank input takes `default`.
pub fn ask(prompt: &str, default: Option<&str>) -> Result<String> {
    if !interactive() {
        return Ok(default.unwrap_or_default().to_string());
    }
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(default) = default.filter(|d| !d.is_empty()) {
        input = input.default(default.to_string());
    }
    Ok(input.interact_text()?.trim().to_string())
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    if !interactive() {
        return Ok(default);
    }
    Ok(Confirm::new().with_prompt(prompt).default(default).interact()?)
}

/// Index of the chosen item; `None` when not interactive.
pub fn choose(prompt: &str, items: &[String]) -> Result<Option<usize>> {
    if !interactive() || items.is_empty() {
        return Ok(None);
    }
    let selection = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?;
    Ok(Some(selection))
}

/// Block until the user presses Enter.
pub fn pause(prompt: &str) -> Result<()> {
    if interactive() {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
    }
    Ok(())
}
