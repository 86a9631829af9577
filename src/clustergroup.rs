//! Cluster group deployments
//!
//! A deployment is one chart release fanned out to every member of a cluster group and
//! reconciled by the platform. Create and update follow the same request lifecycle as
//! cluster services; the whole deployment document is what gets validated.

pub mod commands;
pub mod deployment;

pub use commands::{CreateDeploymentWorkflow, DeploymentCommands, UpdateDeploymentWorkflow};
pub use deployment::{build_deployment, DeploymentValidator};
