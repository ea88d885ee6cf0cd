//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Poodle - Call and sync declarative HTTP API definitions
#[derive(Parser, Debug)]
#[command(name = "poodle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file [default: ~/poodle/config.toml]
    #[arg(short, long, global = true, env = "POODLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create or update the config file
    Configure {
        /// Edit the config file in the editor instead of answering prompts
        #[arg(short, long)]
        edit: bool,
    },

    /// Create a new service definition
    ///
    /// Writes a starter definition and opens it in the editor.
    New {
        /// Service id (letters, digits, `-`, `_` and `/` for nesting)
        id: Option<String>,
    },

    /// Edit a service definition
    Edit {
        /// Service id; picked interactively when omitted
        id: Option<String>,
    },

    /// List callable endpoints
    #[command(alias = "ls")]
    List,

    /// Delete a service definition, locally and from the remote store
    Delete {
        /// Service id; picked interactively when omitted
        id: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Call an endpoint
    ///
    /// Examples:
    ///   poodle call                          # Pick from all services
    ///   poodle call "httpbin - get_ip"       # Call a known endpoint
    ///   poodle call -f api.toml              # Pick from a single file
    Call {
        /// Endpoint key `<service> - <endpoint>`; picked interactively when omitted
        endpoint: Option<String>,

        /// Service definition file used instead of the services directory when it exists
        #[arg(short, long, default_value = "./.poodle.toml")]
        from: PathBuf,
    },

    /// Sync service definitions with the remote store
    Sync {
        /// Only print the sync direction
        #[arg(long)]
        status: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
