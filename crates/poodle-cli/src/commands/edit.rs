//! The edit command

use colored::Colorize;
use poodle_meta::ServiceLoader;

use super::choose_service;
use super::sync::auto_sync;
use crate::context::Context;
use crate::error::Result;
use crate::interactive;

/// Run the edit command
///
/// The definition is re-read after the editor exits. A broken file is
/// reported but kept so it can be fixed in another edit.
pub fn run_edit(ctx: &Context, id: Option<String>) -> Result<()> {
    let mut configs = ctx.configs()?;
    let (id, path) = choose_service(&configs, id)?;

    interactive::open_editor(&ctx.editor(&configs), &path.to_native())?;

    match ServiceLoader::new().load_file(&path) {
        Ok(_) => println!("{} Updated {}", "OK".green().bold(), id.cyan()),
        Err(e) => println!("{}: {}", "warning".yellow().bold(), e),
    }

    auto_sync(ctx, &mut configs);
    Ok(())
}
