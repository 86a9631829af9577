//! Pipectl: integrated services and cluster group deployments on Pipeline
//!
//! A command-line client that builds, reviews and submits request documents for the
//! add-on services of a managed cluster and for deployments fanned out across a
//! cluster group. Every activate/update style command runs the same request lifecycle
//! (acquire, optionally edit behind a validation gate, submit, report).

pub mod api;
pub mod cli;
pub mod clustergroup;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod prompt;
pub mod services;
pub mod target;
