//! The configure command

use std::fs;

use colored::Colorize;
use poodle_core::{GistClient, RemoteStore};
use poodle_meta::Configs;

use crate::context::Context;
use crate::error::{CliError, Result};
use crate::interactive;

/// Make sure the config file exists, writing defaults when it does not.
fn ensure_config(ctx: &Context) -> Result<Configs> {
    if ctx.config_path.is_file() {
        return ctx.configs();
    }

    let configs = Configs::default();
    ctx.save_configs(&configs)?;
    println!(
        "{} Created {}",
        "+".green().bold(),
        ctx.config_path.as_str().cyan()
    );
    Ok(configs)
}

/// Create the services directory when it does not exist yet.
pub(crate) fn ensure_services_dir(configs: &Configs) -> Result<()> {
    let dir = configs.services_dir();
    if dir.is_file() {
        return Err(CliError::user(format!(
            "Services directory {} is a file",
            dir
        )));
    }
    if !dir.is_dir() {
        fs::create_dir_all(dir.to_native())?;
        println!("{} Created {}", "+".green().bold(), dir.as_str().cyan());
    }
    Ok(())
}

/// Check that the token can manage gists for the user.
fn verify_credentials(configs: &Configs) -> Result<()> {
    let client = GistClient::github(&configs.gist.username, &configs.gist.access_token)?;
    let auth = client.auth_check()?;
    if !auth.valid {
        return Err(poodle_core::Error::AuthInvalid {
            scopes: auth.scopes,
        }
        .into());
    }
    println!("{} Token verified for {}", "OK".green().bold(), configs.gist.username.cyan());
    Ok(())
}

/// Run the configure command
///
/// With `edit` the config file is opened in the editor and re-read
/// afterwards. Otherwise the gist credentials and services directory are
/// asked for interactively.
pub fn run_configure(ctx: &Context, edit: bool) -> Result<()> {
    let mut configs = ensure_config(ctx)?;

    if edit {
        interactive::open_editor(&ctx.editor(&configs), &ctx.config_path.to_native())?;
        let configs = ctx.configs()?;
        ensure_services_dir(&configs)?;
        println!("{} Configuration saved", "OK".green().bold());
        return Ok(());
    }

    configs.gist.username = interactive::input("GitHub username", &configs.gist.username)?
        .trim()
        .to_string();
    configs.gist.access_token = interactive::input("Gist access token", &configs.gist.access_token)?
        .trim()
        .to_string();
    configs.services.directory =
        interactive::input("Services directory", &configs.services.directory)?
            .trim()
            .to_string();

    ensure_services_dir(&configs)?;
    if configs.gist.has_credentials() {
        verify_credentials(&configs)?;
    } else {
        println!(
            "{} No gist credentials given; sync stays disabled",
            "!".yellow()
        );
    }

    ctx.save_configs(&configs)?;
    println!("{} Configuration saved", "OK".green().bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_config_writes_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("poodle/config.toml");
        let ctx = Context::new(Some(path.as_path()), false);

        let configs = ensure_config(&ctx).unwrap();

        assert!(path.is_file());
        assert_eq!(configs, Configs::default());
        assert_eq!(ctx.configs().unwrap(), configs);
    }

    #[test]
    fn test_ensure_config_keeps_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[General]\ncolumn = 12\n").unwrap();
        let ctx = Context::new(Some(path.as_path()), false);

        let configs = ensure_config(&ctx).unwrap();
        assert_eq!(configs.general.column, 12);
    }

    #[test]
    fn test_ensure_services_dir() {
        let temp = TempDir::new().unwrap();
        let mut configs = Configs::default();
        configs.services.directory = temp.path().join("a/b").to_string_lossy().into_owned();

        ensure_services_dir(&configs).unwrap();
        assert!(temp.path().join("a/b").is_dir());

        fs::write(temp.path().join("file"), "").unwrap();
        configs.services.directory = temp.path().join("file").to_string_lossy().into_owned();
        assert!(ensure_services_dir(&configs).is_err());
    }
}
