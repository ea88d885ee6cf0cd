//! The list command

use colored::Colorize;
use poodle_meta::{Catalog, CatalogEntry};

use crate::context::Context;
use crate::error::Result;

/// One catalog line, cut to `column` characters.
pub(crate) fn format_entry(entry: &CatalogEntry, column: usize) -> String {
    let line = if entry.endpoint_name.is_empty() {
        entry.key.clone()
    } else {
        format!("{}  {}", entry.key, entry.endpoint_name)
    };

    if column > 0 && line.chars().count() > column {
        let cut: String = line.chars().take(column.saturating_sub(1)).collect();
        format!("{}…", cut)
    } else {
        line
    }
}

/// Run the list command
pub fn run_list(ctx: &Context) -> Result<()> {
    let configs = ctx.configs()?;
    let catalog = Catalog::load_dir(&configs.services_dir(), configs.general.sortby)?;

    if catalog.is_empty() {
        println!(
            "No endpoints found in {}. Use {} to create a service.",
            configs.services.directory.dimmed(),
            "poodle new".cyan()
        );
        return Ok(());
    }

    for entry in catalog.entries() {
        println!(
            "{:<7} {}",
            entry.method.green(),
            format_entry(entry, configs.general.column)
        );
    }

    Ok(())
}
