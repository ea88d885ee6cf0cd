//! Interactive prompts for CLI commands
//!
//! Pickers go through the configured select command (`fzf --ansi` by
//! default) when it is installed, and fall back to a dialoguer fuzzy select.

use std::env;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use colored::Colorize;
use dialoguer::{Confirm, FuzzySelect, Input};
use poodle_core::Fields;

use crate::error::{CliError, Result};

/// Whether `program` resolves to a file in one of the `PATH` directories.
fn on_path(program: &str) -> bool {
    if program.contains('/') {
        return Path::new(program).is_file();
    }
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

/// Pipe `items` through the external select command and read the choice.
fn external_pick(selectcmd: &str, items: &[String]) -> Result<String> {
    let mut parts = selectcmd.split_whitespace();
    let program = parts.next().unwrap_or_default();

    let mut child = Command::new(program)
        .args(parts)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(items.join("\n").as_bytes())?;
    }

    let output = child.wait_with_output()?;
    let choice = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !output.status.success() || choice.is_empty() {
        return Err(CliError::user("Nothing selected."));
    }
    Ok(choice)
}

/// Let the user pick one of `items`.
pub fn pick(prompt: &str, items: &[String], selectcmd: &str) -> Result<String> {
    if items.is_empty() {
        return Err(CliError::user("Nothing to choose from."));
    }

    let program = selectcmd.split_whitespace().next().unwrap_or_default();
    if !program.is_empty() && on_path(program) {
        tracing::debug!(command = %selectcmd, "Using external picker");
        return external_pick(selectcmd, items);
    }

    let index = FuzzySelect::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?;
    Ok(items[index].clone())
}

/// Ask for a value for every field, in name order.
///
/// Optional fields accept an empty answer and keep their default.
pub fn prompt_fields(mut fields: Fields) -> Result<Fields> {
    for field in fields.values_mut() {
        let value: String = if field.is_optional {
            Input::new()
                .with_prompt(&field.prompt)
                .default(field.default.clone())
                .allow_empty(true)
                .interact_text()?
        } else {
            Input::new()
                .with_prompt(&field.prompt)
                .validate_with(|input: &String| {
                    if input.trim().is_empty() {
                        Err("a value is required")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?
        };
        field.value = Some(value);
    }
    Ok(fields)
}

/// Ask for a line of text.
pub fn input(prompt: &str, default: &str) -> Result<String> {
    let value = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Open `path` in `editor` and wait for it to exit.
pub fn open_editor(editor: &str, path: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| CliError::user("No editor configured."))?;

    tracing::debug!(editor = %editor, path = %path.display(), "Opening editor");
    let status = Command::new(program).args(parts).arg(path).status()?;
    if !status.success() {
        return Err(CliError::user(format!(
            "Editor {} exited with {}",
            editor.cyan(),
            status
        )));
    }
    Ok(())
}
