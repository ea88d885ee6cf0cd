//! The local configuration file
//!
//! ```toml
//! [General]
//! editor = "nano"
//! column = 40
//! selectcmd = "fzf --ansi"
//! backend = "gist"
//! sortby = "key"
//!
//! [Gist]
//! username = "octocat"
//! access_token = "..."
//! gist_id = ""
//! public = false
//! auto_sync = false
//!
//! [Services]
//! directory = "/home/octocat/poodle/definitions"
//! ```
//!
//! Keys missing from the file fall back to [`Configs::default`].

use std::fmt;
use std::str::FromStr;

use poodle_fs::{ConfigStore, NormalizedPath, PoodlePath};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How catalog listings are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortBy {
    /// By `"<service> - <endpoint>"` key
    #[default]
    Key,
    /// By service name, then endpoint name
    Name,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "key" | "id" => Ok(SortBy::Key),
            "name" => Ok(SortBy::Name),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

impl TryFrom<String> for SortBy {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortBy> for String {
    fn from(value: SortBy) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Key => write!(f, "key"),
            SortBy::Name => write!(f, "name"),
        }
    }
}

/// Terminal and tooling preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct General {
    pub editor: String,
    pub column: usize,
    pub selectcmd: String,
    pub backend: String,
    pub sortby: SortBy,
}

impl Default for General {
    fn default() -> Self {
        Self {
            editor: "nano".to_string(),
            column: 40,
            selectcmd: "fzf --ansi".to_string(),
            backend: "gist".to_string(),
            sortby: SortBy::default(),
        }
    }
}

/// Remote store credentials and the id of the backing gist.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Gist {
    pub access_token: String,
    pub gist_id: String,
    pub username: String,
    pub public: bool,
    pub auto_sync: bool,
}

impl Gist {
    /// Both username and token are set.
    pub fn has_credentials(&self) -> bool {
        !self.username.trim().is_empty() && !self.access_token.trim().is_empty()
    }
}

/// Where service definition files live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Services {
    pub directory: String,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            directory: PoodlePath::DefinitionsDir.under_home().to_string(),
        }
    }
}

/// The whole configuration document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Configs {
    #[serde(rename = "General")]
    pub general: General,
    #[serde(rename = "Gist")]
    pub gist: Gist,
    #[serde(rename = "Services")]
    pub services: Services,
}

impl Configs {
    /// Load the config file at `path`.
    ///
    /// # Errors
    ///
    /// `ConfigMissing` when the file does not exist, `ConfigDecode` when it
    /// cannot be parsed.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigMissing {
                path: path.to_native(),
            });
        }

        tracing::debug!(path = %path, "Loading configs");
        ConfigStore::new().load(path).map_err(|e| match e {
            poodle_fs::Error::ConfigParse { path, message, .. } => {
                Error::ConfigDecode { path, message }
            }
            other => Error::Fs(other),
        })
    }

    /// Load the config file, or defaults when it does not exist yet.
    pub fn load_or_default(path: &NormalizedPath) -> Result<Self> {
        match Self::load(path) {
            Err(Error::ConfigMissing { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Write the config file atomically.
    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        tracing::debug!(path = %path, "Configs updated");
        Ok(())
    }

    /// The services directory as a normalized path.
    pub fn services_dir(&self) -> NormalizedPath {
        NormalizedPath::new(&self.services.directory)
    }

    /// Path of the definition file for `service_id`.
    pub fn service_path(&self, service_id: &str) -> NormalizedPath {
        self.services_dir().join(&format!("{}.toml", service_id))
    }
}
