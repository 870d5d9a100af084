use thiserror::Error;

/// Errors that stop a CLI command before its batch work can start.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Database could not be opened or queried
    #[error("Database error: {0}")]
    Database(String),

    /// No user with the given username
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// HTTP client could not be constructed
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    pub(crate) fn database(msg: impl std::fmt::Display) -> Self {
        Self::Database(msg.to_string())
    }

    pub(crate) fn unknown_user(name: impl Into<String>) -> Self {
        Self::UnknownUser(name.into())
    }

    pub(crate) fn network(msg: impl std::fmt::Display) -> Self {
        Self::Network(msg.to_string())
    }

    pub(crate) fn config(msg: impl std::fmt::Display) -> Self {
        Self::Config(msg.to_string())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
