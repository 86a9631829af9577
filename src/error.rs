//! Error types for the pipectl command-line client.

use thiserror::Error;

/// Errors surfaced by any pipectl command.
#[derive(Debug, Error)]
pub enum CliError {
    /// A document from a file, standard input or the editor did not parse.
    #[error("{0}")]
    Structural(String),

    /// A specification was rejected by the local validator.
    #[error("invalid specification: {0}")]
    Validation(String),

    #[error("service not enabled: {0}")]
    ServiceNotEnabled(String),

    /// The remote side answered with a non-2xx status.
    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to get user input: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }

    /// Prefix the message with what was being attempted, keeping the variant.
    pub fn context(self, what: impl AsRef<str>) -> Self {
        let what = what.as_ref();
        match self {
            CliError::Structural(msg) => CliError::Structural(format!("{}: {}", what, msg)),
            CliError::Transport(msg) => CliError::Transport(format!("{}: {}", what, msg)),
            CliError::Prompt(msg) => CliError::Prompt(format!("{}: {}", what, msg)),
            CliError::Remote { status, message } => CliError::Remote {
                status,
                message: format!("{}: {}", what, message),
            },
            other => other,
        }
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Prompt(err.to_string())
    }
}
