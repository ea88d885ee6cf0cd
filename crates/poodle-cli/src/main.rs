//! Poodle CLI
//!
//! Call declarative HTTP API definitions and keep them synced with a gist.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use std::io;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Verbose mode enabled");
        }
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::new(cli.config.as_deref(), cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(&ctx, cmd),
        None => {
            println!("{} Declarative HTTP API caller", "poodle".green().bold());
            println!();
            println!("Run {} for available commands.", "poodle --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Configure { edit } => commands::run_configure(ctx, edit),
        Commands::New { id } => commands::run_new(ctx, id),
        Commands::Edit { id } => commands::run_edit(ctx, id),
        Commands::List => commands::run_list(ctx),
        Commands::Delete { id, yes } => commands::run_delete(ctx, id, yes),
        Commands::Call { endpoint, from } => commands::run_call(ctx, endpoint, &from),
        Commands::Sync { status: true } => commands::run_sync_status(ctx),
        Commands::Sync { status: false } => commands::run_sync(ctx),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "poodle", &mut io::stdout());
            Ok(())
        }
    }
}
