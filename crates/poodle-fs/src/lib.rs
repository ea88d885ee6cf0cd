//! Filesystem abstraction for poodle
//!
//! Provides normalized relative paths, atomic writes, a format-agnostic
//! config store and the directory walk used to build local replicas.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod walk;

pub use config::ConfigStore;
pub use constants::PoodlePath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use walk::{FileEntry, list_files};
