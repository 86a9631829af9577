//! Command Orchestrator
//!
//! Drives one invocation through
//! `CheckPrerequisite -> AcquireDocument -> (BuildInteractively | ReadFromSource)
//! -> EditValidateLoop -> Submit -> Report`. A [`Workflow`] supplies the verb and
//! service specific pieces.

use super::document::{SpecDocument, SpecValidator};
use super::edit_loop::edit_validate;
use super::gateway::submit;
use super::source::RequestSource;
use crate::error::CliError;
use crate::prompt::Prompter;
use async_trait::async_trait;
use std::io::Read;
use tracing::{debug, info};

/// Verb and service specific steps of the lifecycle.
#[async_trait]
pub trait Workflow: Send + Sync {
    type Document: SpecDocument + Send + Sync;
    type Outcome: Send;

    /// What is being done, e.g. `activate Monitoring cluster service`.
    fn operation(&self) -> String;

    /// What the request document describes, e.g. `Monitoring cluster service specification`.
    fn document_name(&self) -> String;

    /// Confirm question shown before the editor is opened.
    fn edit_question(&self) -> String;

    fn validator(&self) -> &dyn SpecValidator;

    /// Abort early when the target capability is unavailable.
    async fn check_prerequisite(&self) -> Result<(), CliError> {
        Ok(())
    }

    /// Current remote state to start interactive building from (update verbs).
    async fn seed(&self) -> Result<Option<Self::Document>, CliError> {
        Ok(None)
    }

    fn build_interactively(
        &self,
        seed: Option<Self::Document>,
        prompter: &dyn Prompter,
    ) -> Result<Self::Document, CliError>;

    async fn send(&self, document: &Self::Document) -> Result<Self::Outcome, CliError>;

    /// Confirmation printed on success.
    fn report(&self, outcome: &Self::Outcome) -> String;
}

/// Run one invocation of `workflow` and return the report line.
///
/// Exactly one of interactive building or reading from `source` happens. Documents
/// read from a file or stdin are submitted as read.
pub async fn run_workflow<W: Workflow>(
    workflow: &W,
    source: &RequestSource,
    prompter: &dyn Prompter,
    stdin: &mut dyn Read,
) -> Result<String, CliError> {
    let operation = workflow.operation();

    debug!(operation = %operation, "Checking prerequisites");
    workflow.check_prerequisite().await?;

    let read = source
        .resolve::<W::Document>(stdin)
        .map_err(|e| e.context(format!("failed to read {}", workflow.document_name())))?;
    let document = match read {
        Some(document) => {
            debug!(operation = %operation, "Request read from source");
            document
        }
        None => {
            let seed = workflow.seed().await?;
            debug!(operation = %operation, seeded = seed.is_some(), "Building request interactively");
            let built = workflow
                .build_interactively(seed, prompter)
                .map_err(|e| e.context("failed to build request interactively"))?;
            let outcome = edit_validate(
                built,
                workflow.validator(),
                prompter,
                &workflow.edit_question(),
            )
            .map_err(|e| e.context("failed during showing editor"))?;
            debug!(operation = %operation, edited = outcome.was_edited(), "Edit loop finished");
            outcome.into_document()
        }
    };

    let outcome = submit(&operation, &document, workflow.send(&document)).await?;
    let report = workflow.report(&outcome);
    info!(operation = %operation, "{}", report);
    Ok(report)
}
