//! reqwest-backed implementation of the Pipeline API traits.

use super::models::{
    ActivateIntegratedServiceRequest, Capabilities, ClusterGroupDeployment,
    CreateUpdateDeploymentResponse, DeploymentInfo, IntegratedServiceDetails,
    ListDeploymentResponse, TargetClusterStatus, UpdateIntegratedServiceRequest,
};
use super::response::{classify_response, map_http_error};
use super::{CapabilitiesApi, ClusterGroupDeploymentsApi, IntegratedServicesApi};
use crate::config::PipelineConfig;
use crate::error::CliError;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

const ACCEPT_JSON: &str = "application/json, application/problem+json";

/// HTTP client for the Pipeline API.
pub struct PipelineClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl PipelineClient {
    pub fn new(config: &PipelineConfig) -> Result<Self, CliError> {
        let client = Client::builder()
            .connect_timeout(config.http.connect_timeout())
            .timeout(config.http.request_timeout())
            .build()
            .map_err(|e| CliError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn services_path(org_id: u32, cluster_id: u32) -> String {
        format!("/api/v1/orgs/{}/clusters/{}/services", org_id, cluster_id)
    }

    fn deployments_path(org_id: u32, cluster_group_id: u32) -> String {
        format!(
            "/api/v1/orgs/{}/clustergroups/{}/deployments",
            org_id, cluster_group_id
        )
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, CliError> {
        let mut request = request.header(ACCEPT, ACCEPT_JSON);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_http_error)?;
        let status = response.status();
        debug!(status = %status, url = %response.url(), "Pipeline API response");

        let body = response
            .bytes()
            .await
            .map_err(|e| CliError::Transport(format!("failed to read response body: {}", e)))?;

        classify_response(status.as_u16(), &status.to_string(), &body)
    }
}

#[async_trait]
impl CapabilitiesApi for PipelineClient {
    async fn list_capabilities(&self) -> Result<Capabilities, CliError> {
        self.send(self.client.get(self.url("/api/v1/capabilities")))
            .await
    }
}

#[async_trait]
impl IntegratedServicesApi for PipelineClient {
    async fn list_services(
        &self,
        org_id: u32,
        cluster_id: u32,
    ) -> Result<BTreeMap<String, IntegratedServiceDetails>, CliError> {
        let url = self.url(&Self::services_path(org_id, cluster_id));
        self.send(self.client.get(url)).await
    }

    async fn service_details(
        &self,
        org_id: u32,
        cluster_id: u32,
        service_name: &str,
    ) -> Result<IntegratedServiceDetails, CliError> {
        let url = format!(
            "{}/{}",
            self.url(&Self::services_path(org_id, cluster_id)),
            service_name
        );
        self.send(self.client.get(url)).await
    }

    async fn activate_service(
        &self,
        org_id: u32,
        cluster_id: u32,
        service_name: &str,
        request: &ActivateIntegratedServiceRequest,
    ) -> Result<Value, CliError> {
        let url = format!(
            "{}/{}",
            self.url(&Self::services_path(org_id, cluster_id)),
            service_name
        );
        self.send(self.client.post(url).json(request)).await
    }

    async fn update_service(
        &self,
        org_id: u32,
        cluster_id: u32,
        service_name: &str,
        request: &UpdateIntegratedServiceRequest,
    ) -> Result<Value, CliError> {
        let url = format!(
            "{}/{}",
            self.url(&Self::services_path(org_id, cluster_id)),
            service_name
        );
        self.send(self.client.put(url).json(request)).await
    }

    async fn deactivate_service(
        &self,
        org_id: u32,
        cluster_id: u32,
        service_name: &str,
    ) -> Result<Value, CliError> {
        let url = format!(
            "{}/{}",
            self.url(&Self::services_path(org_id, cluster_id)),
            service_name
        );
        self.send(self.client.delete(url)).await
    }
}

#[async_trait]
impl ClusterGroupDeploymentsApi for PipelineClient {
    async fn create_deployment(
        &self,
        org_id: u32,
        cluster_group_id: u32,
        deployment: &ClusterGroupDeployment,
    ) -> Result<CreateUpdateDeploymentResponse, CliError> {
        let url = self.url(&Self::deployments_path(org_id, cluster_group_id));
        self.send(self.client.post(url).json(deployment)).await
    }

    async fn list_deployments(
        &self,
        org_id: u32,
        cluster_group_id: u32,
    ) -> Result<Vec<ListDeploymentResponse>, CliError> {
        let url = self.url(&Self::deployments_path(org_id, cluster_group_id));
        self.send(self.client.get(url)).await
    }

    async fn get_deployment(
        &self,
        org_id: u32,
        cluster_group_id: u32,
        deployment_name: &str,
    ) -> Result<DeploymentInfo, CliError> {
        let url = format!(
            "{}/{}",
            self.url(&Self::deployments_path(org_id, cluster_group_id)),
            deployment_name
        );
        self.send(self.client.get(url)).await
    }

    async fn update_deployment(
        &self,
        org_id: u32,
        cluster_group_id: u32,
        deployment_name: &str,
        deployment: &ClusterGroupDeployment,
    ) -> Result<CreateUpdateDeploymentResponse, CliError> {
        let url = format!(
            "{}/{}",
            self.url(&Self::deployments_path(org_id, cluster_group_id)),
            deployment_name
        );
        self.send(self.client.put(url).json(deployment)).await
    }

    async fn delete_deployment(
        &self,
        org_id: u32,
        cluster_group_id: u32,
        deployment_name: &str,
        force: bool,
    ) -> Result<Vec<TargetClusterStatus>, CliError> {
        let url = format!(
            "{}/{}",
            self.url(&Self::deployments_path(org_id, cluster_group_id)),
            deployment_name
        );
        let request = self
            .client
            .delete(url)
            .query(&[("force", if force { "true" } else { "false" })]);
        self.send(request).await
    }

    async fn sync_deployment(
        &self,
        org_id: u32,
        cluster_group_id: u32,
        deployment_name: &str,
    ) -> Result<Vec<TargetClusterStatus>, CliError> {
        let url = format!(
            "{}/{}/sync",
            self.url(&Self::deployments_path(org_id, cluster_group_id)),
            deployment_name
        );
        self.send(self.client.put(url)).await
    }
}
