//! Cluster group deployment commands.

use super::deployment::{build_deployment, DeploymentValidator};
use crate::api::{
    ClusterGroupDeployment, CreateUpdateDeploymentResponse, DeploymentInfo, ListDeploymentResponse,
    PipelineApi, TargetClusterStatus,
};
use crate::error::CliError;
use crate::lifecycle::{run_workflow, submit, RequestSource, SpecValidator, Workflow};
use crate::prompt::Prompter;
use crate::target::ClusterGroupContext;
use async_trait::async_trait;
use serde_json::Value;
use std::io::Read;
use tracing::info;

const DOCUMENT_NAME: &str = "cluster group deployment";

pub struct CreateDeploymentWorkflow<'a> {
    api: &'a dyn PipelineApi,
    target: ClusterGroupContext,
}

impl<'a> CreateDeploymentWorkflow<'a> {
    pub fn new(api: &'a dyn PipelineApi, target: ClusterGroupContext) -> Self {
        Self { api, target }
    }
}

#[async_trait]
impl<'a> Workflow for CreateDeploymentWorkflow<'a> {
    type Document = ClusterGroupDeployment;
    type Outcome = CreateUpdateDeploymentResponse;

    fn operation(&self) -> String {
        "create cluster group deployment".to_string()
    }

    fn document_name(&self) -> String {
        DOCUMENT_NAME.to_string()
    }

    fn edit_question(&self) -> String {
        "Do you want to edit the deployment request in your text editor?".to_string()
    }

    fn validator(&self) -> &dyn SpecValidator {
        &DeploymentValidator
    }

    fn build_interactively(
        &self,
        _seed: Option<ClusterGroupDeployment>,
        prompter: &dyn Prompter,
    ) -> Result<ClusterGroupDeployment, CliError> {
        build_deployment(prompter, None)
    }

    async fn send(
        &self,
        deployment: &ClusterGroupDeployment,
    ) -> Result<CreateUpdateDeploymentResponse, CliError> {
        self.api
            .create_deployment(self.target.organization_id, self.target.cluster_group_id, deployment)
            .await
    }

    fn report(&self, outcome: &CreateUpdateDeploymentResponse) -> String {
        format!("deployment {:?} created", outcome.release_name)
    }
}

pub struct UpdateDeploymentWorkflow<'a> {
    api: &'a dyn PipelineApi,
    target: ClusterGroupContext,
    name: String,
}

impl<'a> UpdateDeploymentWorkflow<'a> {
    pub fn new(api: &'a dyn PipelineApi, target: ClusterGroupContext, name: impl Into<String>) -> Self {
        Self {
            api,
            target,
            name: name.into(),
        }
    }
}

#[async_trait]
impl<'a> Workflow for UpdateDeploymentWorkflow<'a> {
    type Document = ClusterGroupDeployment;
    type Outcome = CreateUpdateDeploymentResponse;

    fn operation(&self) -> String {
        format!("update cluster group deployment {:?}", self.name)
    }

    fn document_name(&self) -> String {
        DOCUMENT_NAME.to_string()
    }

    fn edit_question(&self) -> String {
        "Do you want to edit the deployment update request in your text editor?".to_string()
    }

    fn validator(&self) -> &dyn SpecValidator {
        &DeploymentValidator
    }

    async fn seed(&self) -> Result<Option<ClusterGroupDeployment>, CliError> {
        let info = self
            .api
            .get_deployment(self.target.organization_id, self.target.cluster_group_id, &self.name)
            .await
            .map_err(|e| e.context("failed to get deployment details"))?;
        Ok(Some(info.to_update_request()))
    }

    fn build_interactively(
        &self,
        seed: Option<ClusterGroupDeployment>,
        prompter: &dyn Prompter,
    ) -> Result<ClusterGroupDeployment, CliError> {
        build_deployment(prompter, seed)
    }

    async fn send(
        &self,
        deployment: &ClusterGroupDeployment,
    ) -> Result<CreateUpdateDeploymentResponse, CliError> {
        self.api
            .update_deployment(
                self.target.organization_id,
                self.target.cluster_group_id,
                &self.name,
                deployment,
            )
            .await
    }

    fn report(&self, _outcome: &CreateUpdateDeploymentResponse) -> String {
        format!("deployment {:?} updated", self.name)
    }
}

/// Every command acting on the deployments of one cluster group.
pub struct DeploymentCommands<'a> {
    api: &'a dyn PipelineApi,
    target: ClusterGroupContext,
}

impl<'a> DeploymentCommands<'a> {
    pub fn new(api: &'a dyn PipelineApi, target: ClusterGroupContext) -> Self {
        Self { api, target }
    }

    pub async fn create(
        &self,
        source: &RequestSource,
        prompter: &dyn Prompter,
        stdin: &mut dyn Read,
    ) -> Result<String, CliError> {
        let workflow = CreateDeploymentWorkflow::new(self.api, self.target);
        run_workflow(&workflow, source, prompter, stdin).await
    }

    pub async fn update(
        &self,
        name: &str,
        source: &RequestSource,
        prompter: &dyn Prompter,
        stdin: &mut dyn Read,
    ) -> Result<String, CliError> {
        let workflow = UpdateDeploymentWorkflow::new(self.api, self.target, name);
        run_workflow(&workflow, source, prompter, stdin).await
    }

    pub async fn get(&self, name: &str) -> Result<DeploymentInfo, CliError> {
        self.api
            .get_deployment(self.target.organization_id, self.target.cluster_group_id, name)
            .await
            .map_err(|e| e.context("failed to get deployment details"))
    }

    pub async fn list(&self) -> Result<Vec<ListDeploymentResponse>, CliError> {
        self.api
            .list_deployments(self.target.organization_id, self.target.cluster_group_id)
            .await
            .map_err(|e| e.context("failed to list deployments"))
    }

    /// Delete the deployment from every member cluster.
    ///
    /// Returns `None` when the operator declined. Without `yes` the operator is asked
    /// first, which requires an interactive session.
    pub async fn delete(
        &self,
        name: &str,
        force: bool,
        yes: bool,
        interactive: bool,
        prompter: &dyn Prompter,
    ) -> Result<Option<Vec<TargetClusterStatus>>, CliError> {
        if !yes {
            if !interactive {
                return Err(CliError::Usage(format!(
                    "refusing to delete deployment {:?} without confirmation; pass --yes",
                    name
                )));
            }
            let question = format!("Do you want to delete deployment {:?}?", name);
            if !prompter.confirm(&question, false)? {
                return Ok(None);
            }
        }

        let operation = format!("delete cluster group deployment {:?}", name);
        let call = self.api.delete_deployment(
            self.target.organization_id,
            self.target.cluster_group_id,
            name,
            force,
        );
        let statuses = submit(&operation, &Value::Null, call).await?;
        info!(deployment = name, force, "Deployment deleted");
        Ok(Some(statuses))
    }

    /// Reinstall the deployment on member clusters where it drifted.
    pub async fn sync(&self, name: &str) -> Result<Vec<TargetClusterStatus>, CliError> {
        let operation = format!("sync cluster group deployment {:?}", name);
        let call = self
            .api
            .sync_deployment(self.target.organization_id, self.target.cluster_group_id, name);
        submit(&operation, &Value::Null, call).await
    }
}
