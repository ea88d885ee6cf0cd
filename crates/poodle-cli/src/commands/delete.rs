//! The delete command

use colored::Colorize;
use poodle_core::{GistClient, RemoteStore, SyncEngine};
use poodle_fs::{NormalizedPath, io};
use poodle_meta::Configs;

use super::sync::auto_sync;
use super::{choose_service, replica_key};
use crate::context::Context;
use crate::error::{CliError, Result};
use crate::interactive;

/// Run the delete command
///
/// The file is removed locally first. With gist credentials configured it
/// is then dropped from the remote replica, so the next sync does not
/// bring it back.
pub fn run_delete(ctx: &Context, id: Option<String>, yes: bool) -> Result<()> {
    let mut configs = ctx.configs()?;
    let (id, path) = choose_service(&configs, id)?;

    if !yes && !interactive::confirm(&format!("Delete service '{}'?", id))? {
        return Err(CliError::user("Aborted."));
    }

    io::remove_file(&path)?;
    println!("{} Deleted {}", "-".red().bold(), path.as_str().cyan());

    if configs.gist.has_credentials() {
        remove_remote(&configs, &path)?;
    }

    auto_sync(ctx, &mut configs);
    Ok(())
}

fn remove_remote(configs: &Configs, path: &NormalizedPath) -> Result<()> {
    let Some(key) = replica_key(configs, path) else {
        tracing::warn!(path = %path, "Service lies outside the services directory");
        return Ok(());
    };

    let client = GistClient::github(&configs.gist.username, &configs.gist.access_token)?;
    let engine = SyncEngine::new(client, configs.services_dir(), configs.gist.public);
    remove_from_gist(&engine, &configs.gist.gist_id, &key)
}

/// Drop `key` from the gist. Invalid credentials only skip the remote
/// removal; the local file is already gone.
fn remove_from_gist<R: RemoteStore>(engine: &SyncEngine<R>, gist_id: &str, key: &str) -> Result<()> {
    match engine.remove(gist_id, key) {
        Ok(true) => println!("{} Removed {} from gist", "-".red().bold(), key),
        Ok(false) => {}
        Err(e @ poodle_core::Error::AuthInvalid { .. }) => {
            eprintln!("{}: {}; {} was kept in the gist", "warning".yellow().bold(), e, key);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
