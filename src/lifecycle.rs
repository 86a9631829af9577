//! Request lifecycle shared by every activate/update style command.
//!
//! A request document is acquired from a file, standard input or interactive prompts,
//! optionally revised in the operator's editor behind a validation gate, and finally
//! submitted through the Pipeline API. Each piece is independent of the service kind;
//! [`orchestrator::Workflow`] is the only seam a command has to fill in.

pub mod document;
pub mod edit_loop;
pub mod gateway;
pub mod orchestrator;
pub mod source;

pub use document::{SpecDocument, SpecError, SpecValidator};
pub use edit_loop::{edit_validate, EditOutcome};
pub use gateway::submit;
pub use orchestrator::{run_workflow, Workflow};
pub use source::RequestSource;
