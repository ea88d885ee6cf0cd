//! Well-known locations used by poodle.

use std::path::Path;

/// Standard poodle filesystem locations, relative to the user's home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoodlePath {
    /// The `poodle` directory holding config and definitions
    HomeDir,
    /// The configuration file
    ConfigFile,
    /// The default service definitions directory
    DefinitionsDir,
    /// A service definition next to the current project
    LocalDefinition,
}

impl PoodlePath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HomeDir => "poodle",
            Self::ConfigFile => "poodle/config.toml",
            Self::DefinitionsDir => "poodle/definitions",
            Self::LocalDefinition => "./.poodle.toml",
        }
    }

    /// Resolve against the user's home directory, falling back to the
    /// current directory when no home can be determined.
    pub fn under_home(&self) -> crate::NormalizedPath {
        let home = dirs::home_dir().unwrap_or_else(|| ".".into());
        crate::NormalizedPath::new(home).join(self.as_str())
    }
}

impl AsRef<Path> for PoodlePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for PoodlePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
