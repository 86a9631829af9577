//! Edit-Validate Loop
//!
//! Offers the operator an editor round-trip on the current document. The edited text
//! has to pass the spec validator before the editor session is accepted; a rejected
//! edit sends the operator straight back into the editor with their text intact.
//!
//! ```text
//! Idle --decline--> (Unchanged)
//! Idle --accept--> Editing --> Validating --ok--> Done --> (Edited)
//!                     ^             |
//!                     +---Retry<----+ invalid
//! ```

use super::document::{SpecDocument, SpecValidator};
use crate::error::CliError;
use crate::prompt::Prompter;
use serde_json::Value;
use tracing::debug;

/// Result of the loop.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome<D> {
    /// The operator declined to edit; the document was not validated.
    Unchanged(D),
    /// The operator edited the document and the result passed validation.
    Edited(D),
}

impl<D> EditOutcome<D> {
    pub fn into_document(self) -> D {
        match self {
            EditOutcome::Unchanged(doc) | EditOutcome::Edited(doc) => doc,
        }
    }

    pub fn was_edited(&self) -> bool {
        matches!(self, EditOutcome::Edited(_))
    }
}

enum EditState {
    Idle,
    Editing {
        text: String,
        rejection: Option<String>,
    },
    Validating(String),
    Retry {
        text: String,
        reason: String,
    },
    Done(String),
}

/// Run the loop for `document`, asking `question` before opening the editor.
pub fn edit_validate<D: SpecDocument>(
    document: D,
    validator: &dyn SpecValidator,
    prompter: &dyn Prompter,
    question: &str,
) -> Result<EditOutcome<D>, CliError> {
    let mut state = EditState::Idle;
    loop {
        state = match state {
            EditState::Idle => {
                if !prompter.confirm(question, false)? {
                    debug!("Edit declined, passing request through");
                    return Ok(EditOutcome::Unchanged(document));
                }
                EditState::Editing {
                    text: document.render()?,
                    rejection: None,
                }
            }
            EditState::Editing { text, rejection } => {
                // Quitting without saving keeps the text that was presented.
                let edited = prompter
                    .edit(&text, rejection.as_deref())?
                    .unwrap_or(text);
                EditState::Validating(edited)
            }
            EditState::Validating(text) => match gate::<D>(&text, validator) {
                Ok(()) => EditState::Done(text),
                Err(reason) => EditState::Retry { text, reason },
            },
            EditState::Retry { text, reason } => {
                debug!(reason = %reason, "Edited request rejected, reopening editor");
                EditState::Editing {
                    text,
                    rejection: Some(reason),
                }
            }
            EditState::Done(text) => return D::parse(&text).map(EditOutcome::Edited),
        };
    }
}

/// Validation applied to editor text before the session is accepted.
fn gate<D: SpecDocument>(text: &str, validator: &dyn SpecValidator) -> Result<(), String> {
    let raw: Value =
        serde_json::from_str(text).map_err(|e| format!("request is not valid JSON: {}", e))?;
    validator
        .validate_spec(D::spec_view(&raw))
        .map_err(|e| e.to_string())
}
