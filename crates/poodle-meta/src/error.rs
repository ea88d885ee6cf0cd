//! Error types for poodle-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] poodle_fs::Error),

    #[error("Config file is missing at {path}, please start with `poodle configure`")]
    ConfigMissing { path: PathBuf },

    #[error("Error while decoding configs {path}: {message}")]
    ConfigDecode { path: PathBuf, message: String },

    #[error("Error while decoding service {path}: {message}")]
    ServiceDecode { path: PathBuf, message: String },

    #[error("Endpoint '{endpoint}' of service '{service}' uses unsupported method '{method}'")]
    UnsupportedMethod {
        service: String,
        endpoint: String,
        method: String,
    },

    #[error("Invalid timeout '{value}', expected a whole number of seconds like \"30s\"")]
    InvalidTimeout { value: String },

    #[error("Service '{service}' defines endpoint '{endpoint}' more than once")]
    DuplicateEndpoint { service: String, endpoint: String },

    #[error("Invalid security section: {message}")]
    InvalidSecurity { message: String },

    #[error("Service id '{id}' must be non-empty and alphanumeric (A-Z a-z 0-9 - _ /)")]
    InvalidServiceId { id: String },
}
