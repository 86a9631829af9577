//! Request documents, their editable text form, and spec validation.

use crate::api::{ActivateIntegratedServiceRequest, ClusterGroupDeployment, UpdateIntegratedServiceRequest};
use crate::error::CliError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

static NULL: Value = Value::Null;

/// Reason a specification was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SpecError(pub String);

impl SpecError {
    pub fn new(reason: impl Into<String>) -> Self {
        SpecError(reason.into())
    }
}

/// Checks a loosely typed specification against the rules of one service kind.
pub trait SpecValidator: Send + Sync {
    fn validate_spec(&self, spec: &Value) -> Result<(), SpecError>;
}

/// A structured request that can be rendered for editing and parsed back.
pub trait SpecDocument: Serialize + DeserializeOwned {
    /// The part of a raw document the validator judges.
    fn spec_view(raw: &Value) -> &Value {
        raw.get("spec").unwrap_or(&NULL)
    }

    /// Indented text handed to the editor.
    fn render(&self) -> Result<String, CliError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CliError::Structural(format!("failed to marshal request to JSON: {}", e)))
    }

    /// Parse editor text back into the typed document.
    fn parse(text: &str) -> Result<Self, CliError> {
        serde_json::from_str(text)
            .map_err(|e| CliError::Structural(format!("failed to unmarshal JSON as request: {}", e)))
    }
}

impl SpecDocument for ActivateIntegratedServiceRequest {}

impl SpecDocument for UpdateIntegratedServiceRequest {}

impl SpecDocument for ClusterGroupDeployment {
    fn spec_view(raw: &Value) -> &Value {
        raw
    }
}
