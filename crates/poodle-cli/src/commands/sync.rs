//! The sync command and the auto-sync hook run after local edits

use colored::Colorize;
use poodle_core::{GistClient, SyncEngine, SyncReport, SyncState};
use poodle_meta::Configs;

use crate::context::Context;
use crate::error::{CliError, Result};

fn engine(configs: &Configs) -> Result<SyncEngine<GistClient>> {
    if !configs.gist.has_credentials() {
        return Err(CliError::NotConfigured {
            message: format!(
                "Gist credentials are not configured. Run {} first.",
                "poodle configure".cyan()
            ),
        });
    }

    let client = GistClient::github(&configs.gist.username, &configs.gist.access_token)?;
    Ok(SyncEngine::new(
        client,
        configs.services_dir(),
        configs.gist.public,
    ))
}

/// Remember a new blob id in the config file.
fn record_blob_id(ctx: &Context, configs: &mut Configs, report: &SyncReport) -> Result<()> {
    if report.blob_id == configs.gist.gist_id {
        return Ok(());
    }
    configs.gist.gist_id = report.blob_id.clone();
    ctx.save_configs(configs)?;
    tracing::debug!(id = %report.blob_id, "Stored new gist id");
    Ok(())
}

fn print_report(report: &SyncReport) {
    if report.created {
        println!(
            "{} Created gist {}",
            "+".green().bold(),
            report.blob_id.cyan()
        );
    }

    for path in &report.downloaded {
        println!("   {} {}", "↓".green(), path);
    }
    for path in &report.uploaded {
        println!("   {} {}", "↑".blue(), path);
    }
    for path in &report.conflicts {
        println!(
            "   {} {} {}",
            "!".yellow(),
            path,
            "(changed on both sides, left untouched)".dimmed()
        );
    }

    if report.is_up_to_date() {
        println!("{}", "Already up-to-date".green());
    } else {
        println!(
            "{} {} downloaded, {} uploaded",
            "OK".green().bold(),
            report.downloaded.len(),
            report.uploaded.len()
        );
    }
}

pub(crate) fn describe_state(state: SyncState) -> String {
    match state {
        SyncState::InSync => "Local services are in sync with the gist".green().to_string(),
        SyncState::Upload => "Local services have changes to upload".yellow().to_string(),
        SyncState::Download => "The gist has changes to download".yellow().to_string(),
    }
}

/// Sync and remember the blob id the engine ended up using.
fn sync_now(ctx: &Context, configs: &mut Configs) -> Result<SyncReport> {
    let report = engine(configs)?.sync(&configs.gist.gist_id)?;
    record_blob_id(ctx, configs, &report)?;
    Ok(report)
}

/// Run the sync command
pub fn run_sync(ctx: &Context) -> Result<()> {
    let mut configs = ctx.configs()?;

    println!("{} Syncing with gist...", "=>".blue().bold());
    let report = sync_now(ctx, &mut configs)?;

    print_report(&report);
    Ok(())
}

/// Run `sync --status`: report the direction without changing anything.
pub fn run_sync_status(ctx: &Context) -> Result<()> {
    let configs = ctx.configs()?;
    let state = engine(&configs)?.status(&configs.gist.gist_id)?;

    println!("{} ({})", describe_state(state), state.to_string().dimmed());
    Ok(())
}

/// Sync after a local change when `Gist.auto_sync` is on.
///
/// Failures are reported as warnings; the local change already happened.
pub(crate) fn auto_sync(ctx: &Context, configs: &mut Configs) {
    if !configs.gist.auto_sync {
        return;
    }
    if !configs.gist.has_credentials() {
        tracing::warn!("auto_sync is on but gist credentials are missing");
        return;
    }

    let result = sync_now(ctx, configs);

    match result {
        Ok(report) => print_report(&report),
        Err(e) => eprintln!("{}: auto sync failed: {}", "warning".yellow().bold(), e),
    }
}
