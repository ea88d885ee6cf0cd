//! Values shared by every command
//!
//! Built once in `main` from the global flags and passed to each command.

use poodle_fs::{NormalizedPath, PoodlePath};
use poodle_meta::Configs;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Context {
    /// Location of the config file
    pub config_path: NormalizedPath,
    pub verbose: bool,
}

impl Context {
    /// `config` overrides the default `~/poodle/config.toml`.
    pub fn new(config: Option<&std::path::Path>, verbose: bool) -> Self {
        let config_path = match config {
            Some(path) => NormalizedPath::new(path),
            None => PoodlePath::ConfigFile.under_home(),
        };
        Self {
            config_path,
            verbose,
        }
    }

    /// Load the config file; missing or undecodable files are errors.
    pub fn configs(&self) -> Result<Configs> {
        Ok(Configs::load(&self.config_path)?)
    }

    pub fn save_configs(&self, configs: &Configs) -> Result<()> {
        Ok(configs.save(&self.config_path)?)
    }

    /// `$EDITOR` when set, the configured editor otherwise.
    pub fn editor(&self, configs: &Configs) -> String {
        std::env::var("EDITOR")
            .ok()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| configs.general.editor.clone())
    }
}
