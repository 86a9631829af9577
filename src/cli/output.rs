//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::CliError;

/// Map a command failure to the line printed on stderr.
pub fn map_error(e: &CliError) -> String {
    match e {
        CliError::Remote { status, message } => format!("{} (HTTP {})", message, status),
        other => other.to_string(),
    }
}
