//! Pipeline API
//!
//! Typed access to the remote platform. Commands depend on the traits below, never on
//! the HTTP client directly, so the transport can be replaced in tests.

use crate::error::CliError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

mod client;
pub mod models;
mod response;

pub use client::PipelineClient;
pub use models::{
    ActivateIntegratedServiceRequest, Capabilities, CapabilityStatus, ClusterGroupDeployment,
    CommonError, CreateUpdateDeploymentResponse, DeploymentInfo, IntegratedServiceDetails,
    ListDeploymentResponse, Spec, TargetClusterStatus, UpdateIntegratedServiceRequest,
};
pub use response::{classify_response, map_http_error};

/// Platform capability discovery.
#[async_trait]
pub trait CapabilitiesApi: Send + Sync {
    async fn list_capabilities(&self) -> Result<Capabilities, CliError>;
}

/// Integrated services attached to a single cluster.
#[async_trait]
pub trait IntegratedServicesApi: Send + Sync {
    async fn list_services(
        &self,
        org_id: u32,
        cluster_id: u32,
    ) -> Result<BTreeMap<String, IntegratedServiceDetails>, CliError>;

    async fn service_details(
        &self,
        org_id: u32,
        cluster_id: u32,
        service_name: &str,
    ) -> Result<IntegratedServiceDetails, CliError>;

    async fn activate_service(
        &self,
        org_id: u32,
        cluster_id: u32,
        service_name: &str,
        request: &ActivateIntegratedServiceRequest,
    ) -> Result<Value, CliError>;

    async fn update_service(
        &self,
        org_id: u32,
        cluster_id: u32,
        service_name: &str,
        request: &UpdateIntegratedServiceRequest,
    ) -> Result<Value, CliError>;

    async fn deactivate_service(
        &self,
        org_id: u32,
        cluster_id: u32,
        service_name: &str,
    ) -> Result<Value, CliError>;
}

/// Deployments fanned out to every member of a cluster group.
#[async_trait]
pub trait ClusterGroupDeploymentsApi: Send + Sync {
    async fn create_deployment(
        &self,
        org_id: u32,
        cluster_group_id: u32,
        deployment: &ClusterGroupDeployment,
    ) -> Result<CreateUpdateDeploymentResponse, CliError>;

    async fn list_deployments(
        &self,
        org_id: u32,
        cluster_group_id: u32,
    ) -> Result<Vec<ListDeploymentResponse>, CliError>;

    async fn get_deployment(
        &self,
        org_id: u32,
        cluster_group_id: u32,
        deployment_name: &str,
    ) -> Result<DeploymentInfo, CliError>;

    async fn update_deployment(
        &self,
        org_id: u32,
        cluster_group_id: u32,
        deployment_name: &str,
        deployment: &ClusterGroupDeployment,
    ) -> Result<CreateUpdateDeploymentResponse, CliError>;

    async fn delete_deployment(
        &self,
        org_id: u32,
        cluster_group_id: u32,
        deployment_name: &str,
        force: bool,
    ) -> Result<Vec<TargetClusterStatus>, CliError>;

    async fn sync_deployment(
        &self,
        org_id: u32,
        cluster_group_id: u32,
        deployment_name: &str,
    ) -> Result<Vec<TargetClusterStatus>, CliError>;
}

/// Everything the command layer needs from the platform.
pub trait PipelineApi: CapabilitiesApi + IntegratedServicesApi + ClusterGroupDeploymentsApi {}

impl<T> PipelineApi for T where T: CapabilitiesApi + IntegratedServicesApi + ClusterGroupDeploymentsApi {}
