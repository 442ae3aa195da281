//! Command-line interface module.
//!
//! CLI structure and command handlers for the feuilleton binary.

mod commands;
mod generate;
mod history;
mod project;

pub use commands::{Cli, Commands, OutputFormat, PromptCommands};
pub use generate::{GenerateOverrides, run_generation};
pub use history::{list_chapters, list_history};
pub use project::{create_project, handle_prompt_command, search_projects, show_project};

use feuilleton::JsonError;
use serde::Serialize;

fn print_json(value: &impl Serialize) -> feuilleton::FeuilletonResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::new("output", e.to_string()))?;
    println!("{}", json);
    Ok(())
}
