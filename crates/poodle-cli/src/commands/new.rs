//! The new command

use colored::Colorize;
use poodle_fs::ConfigStore;
use poodle_meta::{Service, ServiceLoader, validate_service_id};

use super::configure::ensure_services_dir;
use super::sync::auto_sync;
use crate::context::Context;
use crate::error::{CliError, Result};
use crate::interactive;

/// Write the starter definition for `id`, refusing to overwrite.
pub(crate) fn create_service(ctx: &Context, id: &str) -> Result<poodle_fs::NormalizedPath> {
    let configs = ctx.configs()?;
    validate_service_id(id)?;

    let path = configs.service_path(id);
    if path.exists() {
        return Err(CliError::user(format!(
            "Service '{}' already exists at {}",
            id, path
        )));
    }

    ensure_services_dir(&configs)?;
    ConfigStore::new().save(&path, &Service::template(id))?;
    tracing::debug!(path = %path, "Wrote service template");
    Ok(path)
}

/// Run the new command
pub fn run_new(ctx: &Context, id: Option<String>) -> Result<()> {
    let id = match id {
        Some(id) => id,
        None => interactive::input("Service id", "")?,
    };
    let id = id.trim();

    let path = create_service(ctx, id)?;
    println!("{} Created {}", "+".green().bold(), path.as_str().cyan());

    let mut configs = ctx.configs()?;
    interactive::open_editor(&ctx.editor(&configs), &path.to_native())?;

    if let Err(e) = ServiceLoader::new().load_file(&path) {
        println!("{}: {}", "warning".yellow().bold(), e);
    }

    auto_sync(ctx, &mut configs);
    Ok(())
}
