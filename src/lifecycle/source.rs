//! Request Source Resolver: file path, standard input, or nothing (go interactive).

use crate::error::CliError;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a request document may come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSource {
    /// `-f/--file`; `-` means standard input
    pub file: Option<PathBuf>,
    /// Prompts may be shown
    pub interactive: bool,
}

impl RequestSource {
    pub fn new(file: Option<PathBuf>, interactive: bool) -> Self {
        Self { file, interactive }
    }

    /// Read and parse the document, or return `None` when it should be built
    /// interactively instead. Documents read here are not validated.
    pub fn resolve<D: DeserializeOwned>(&self, stdin: &mut dyn Read) -> Result<Option<D>, CliError> {
        let (origin, raw) = match self.file.as_deref() {
            Some(path) if path == Path::new("-") => ("standard input".to_string(), read_stdin(stdin)?),
            Some(path) => {
                let raw = std::fs::read(path).map_err(|e| {
                    CliError::Structural(format!("failed to read {}: {}", path.display(), e))
                })?;
                (path.display().to_string(), raw)
            }
            None if self.interactive => return Ok(None),
            None => ("standard input".to_string(), read_stdin(stdin)?),
        };

        debug!(origin = %origin, bytes = raw.len(), "Read request document");
        serde_json::from_slice(&raw).map(Some).map_err(|e| {
            CliError::Structural(format!("failed to unmarshal input from {}: {}", origin, e))
        })
    }
}

fn read_stdin(stdin: &mut dyn Read) -> Result<Vec<u8>, CliError> {
    let mut raw = Vec::new();
    stdin
        .read_to_end(&mut raw)
        .map_err(|e| CliError::Structural(format!("failed to read standard input: {}", e)))?;
    Ok(raw)
}
