//! Error types for poodle-core

/// Result type for poodle-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in poodle-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No `"<Service.ID> - <Endpoint.ID>"` pair matches the requested key
    #[error("Endpoint '{key}' not found")]
    EndpointNotFound { key: String },

    /// A placeholder could not be matched against the extracted fields
    #[error("Malformed template: placeholder '{placeholder}' has no field")]
    MalformedTemplate { placeholder: String },

    /// A required field reached resolution without a value
    #[error("Field '{name}' is required but has no value")]
    MissingValue { name: String },

    /// Network failure or unexpected HTTP status
    #[error("Transport error{}: {message}", status.map(|s| format!(" (status {})", s)).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Remote credentials are present but lack the required scope
    #[error("Invalid username, token or scopes [{scopes}] don't include gist")]
    AuthInvalid { scopes: String },

    /// The stored blob id no longer resolves
    #[error("Remote blob '{id}' not found")]
    RemoteNotFound { id: String },

    /// The remote payload is not a valid replica document
    #[error("Failed to decode remote payload: {message}")]
    PayloadDecode { message: String },

    /// A remote key would escape the local services directory
    #[error("Refusing to write unsafe remote path '{path}'")]
    UnsafePath { path: String },

    // Transparent wrappers for underlying crate errors
    #[error(transparent)]
    Fs(#[from] poodle_fs::Error),

    #[error(transparent)]
    Meta(#[from] poodle_meta::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }
}
