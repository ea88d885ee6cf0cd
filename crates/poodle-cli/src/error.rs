//! Error types for poodle-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from poodle-core
    #[error(transparent)]
    Core(#[from] poodle_core::Error),

    /// Error from poodle-meta
    #[error(transparent)]
    Meta(#[from] poodle_meta::Error),

    /// Error from poodle-fs
    #[error(transparent)]
    Fs(#[from] poodle_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },

    /// A setting the command needs is not configured
    #[error("{message}")]
    NotConfigured { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    ///
    /// | Code | Kind |
    /// |------|------|
    /// | 1 | user abort, generic user error |
    /// | 2 | configuration missing, undecodable or incomplete |
    /// | 3 | invalid service definition |
    /// | 4 | endpoint not found, field resolution |
    /// | 5 | transport or remote store failure |
    /// | 6 | remote credentials invalid |
    /// | 7 | local filesystem failure |
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) => core_exit_code(e),
            CliError::Meta(e) => meta_exit_code(e),
            CliError::Fs(_) | CliError::Io(_) => 7,
            CliError::Dialoguer(_) | CliError::User { .. } => 1,
            CliError::NotConfigured { .. } => 2,
        }
    }
}

fn meta_exit_code(error: &poodle_meta::Error) -> i32 {
    use poodle_meta::Error;

    match error {
        Error::ConfigMissing { .. } | Error::ConfigDecode { .. } => 2,
        Error::ServiceDecode { .. }
        | Error::UnsupportedMethod { .. }
        | Error::InvalidTimeout { .. }
        | Error::DuplicateEndpoint { .. }
        | Error::InvalidSecurity { .. }
        | Error::InvalidServiceId { .. } => 3,
        Error::Fs(_) => 7,
    }
}

fn core_exit_code(error: &poodle_core::Error) -> i32 {
    use poodle_core::Error;

    match error {
        Error::EndpointNotFound { .. } | Error::MalformedTemplate { .. } | Error::MissingValue { .. } => 4,
        Error::Transport { .. }
        | Error::RemoteNotFound { .. }
        | Error::PayloadDecode { .. }
        | Error::UnsafePath { .. }
        | Error::Json(_) => 5,
        Error::AuthInvalid { .. } => 6,
        Error::Fs(_) => 7,
        Error::Meta(e) => meta_exit_code(e),
    }
}
