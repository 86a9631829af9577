//! Integration tests for pipectl

mod config_integration;
mod deployment_flow;
mod service_lifecycle;
