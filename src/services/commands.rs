//! Cluster service commands: activate, update, get, deactivate, validate and list.

use super::ServiceKind;
use crate::api::{
    ActivateIntegratedServiceRequest, Capabilities, IntegratedServiceDetails, PipelineApi,
    UpdateIntegratedServiceRequest,
};
use crate::error::CliError;
use crate::lifecycle::{run_workflow, RequestSource, SpecError, SpecValidator, Workflow};
use crate::prompt::Prompter;
use crate::target::ClusterContext;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};

/// Fail with [`CliError::ServiceNotEnabled`] unless the platform offers `kind`.
pub async fn check_service_enabled(api: &dyn PipelineApi, kind: &dyn ServiceKind) -> Result<(), CliError> {
    let capabilities = api
        .list_capabilities()
        .await
        .map_err(|e| e.context("failed to check service"))?;
    if !capabilities.is_enabled(Capabilities::INTEGRATED_SERVICES, kind.service_name()) {
        return Err(CliError::ServiceNotEnabled(kind.service_name().to_string()));
    }
    debug!(service = kind.service_name(), "Service is enabled");
    Ok(())
}

/// First-time enablement of a service on a cluster.
pub struct ActivateWorkflow<'a> {
    api: &'a dyn PipelineApi,
    kind: &'static dyn ServiceKind,
    target: ClusterContext,
}

impl<'a> ActivateWorkflow<'a> {
    pub fn new(api: &'a dyn PipelineApi, kind: &'static dyn ServiceKind, target: ClusterContext) -> Self {
        Self { api, kind, target }
    }
}

impl<'a> SpecValidator for ActivateWorkflow<'a> {
    fn validate_spec(&self, spec: &Value) -> Result<(), SpecError> {
        self.kind.validate_spec(spec)
    }
}

#[async_trait]
impl<'a> Workflow for ActivateWorkflow<'a> {
    type Document = ActivateIntegratedServiceRequest;
    type Outcome = Value;

    fn operation(&self) -> String {
        format!("activate {} cluster service", self.kind.readable_name())
    }

    fn document_name(&self) -> String {
        format!("{} cluster service specification", self.kind.readable_name())
    }

    fn edit_question(&self) -> String {
        "Do you want to edit the cluster service activation request in your text editor?".to_string()
    }

    fn validator(&self) -> &dyn SpecValidator {
        self
    }

    async fn check_prerequisite(&self) -> Result<(), CliError> {
        check_service_enabled(self.api, self.kind).await
    }

    fn build_interactively(
        &self,
        _seed: Option<ActivateIntegratedServiceRequest>,
        prompter: &dyn Prompter,
    ) -> Result<ActivateIntegratedServiceRequest, CliError> {
        self.kind.build_activate_request(prompter)
    }

    async fn send(&self, request: &ActivateIntegratedServiceRequest) -> Result<Value, CliError> {
        self.api
            .activate_service(
                self.target.organization_id,
                self.target.cluster_id,
                self.kind.service_name(),
                request,
            )
            .await
    }

    fn report(&self, _outcome: &Value) -> String {
        format!("service {:?} started to activate", self.kind.readable_name())
    }
}

/// Modification of an already active service, seeded from its persisted spec.
pub struct UpdateWorkflow<'a> {
    api: &'a dyn PipelineApi,
    kind: &'static dyn ServiceKind,
    target: ClusterContext,
}

impl<'a> UpdateWorkflow<'a> {
    pub fn new(api: &'a dyn PipelineApi, kind: &'static dyn ServiceKind, target: ClusterContext) -> Self {
        Self { api, kind, target }
    }
}

impl<'a> SpecValidator for UpdateWorkflow<'a> {
    fn validate_spec(&self, spec: &Value) -> Result<(), SpecError> {
        self.kind.validate_spec(spec)
    }
}

#[async_trait]
impl<'a> Workflow for UpdateWorkflow<'a> {
    type Document = UpdateIntegratedServiceRequest;
    type Outcome = Value;

    fn operation(&self) -> String {
        format!("update {} cluster service", self.kind.readable_name())
    }

    fn document_name(&self) -> String {
        format!("{} cluster service specification", self.kind.readable_name())
    }

    fn edit_question(&self) -> String {
        "Do you want to edit the cluster service update request in your text editor?".to_string()
    }

    fn validator(&self) -> &dyn SpecValidator {
        self
    }

    async fn check_prerequisite(&self) -> Result<(), CliError> {
        check_service_enabled(self.api, self.kind).await
    }

    async fn seed(&self) -> Result<Option<UpdateIntegratedServiceRequest>, CliError> {
        let details = self
            .api
            .service_details(
                self.target.organization_id,
                self.target.cluster_id,
                self.kind.service_name(),
            )
            .await
            .map_err(|e| e.context("failed to get service details"))?;
        Ok(Some(UpdateIntegratedServiceRequest { spec: details.spec }))
    }

    fn build_interactively(
        &self,
        seed: Option<UpdateIntegratedServiceRequest>,
        prompter: &dyn Prompter,
    ) -> Result<UpdateIntegratedServiceRequest, CliError> {
        let mut request = seed.unwrap_or_default();
        self.kind.build_update_request(prompter, &mut request)?;
        Ok(request)
    }

    async fn send(&self, request: &UpdateIntegratedServiceRequest) -> Result<Value, CliError> {
        self.api
            .update_service(
                self.target.organization_id,
                self.target.cluster_id,
                self.kind.service_name(),
                request,
            )
            .await
    }

    fn report(&self, _outcome: &Value) -> String {
        format!("service {:?} started to update", self.kind.readable_name())
    }
}

/// Every command acting on one service kind of one cluster.
pub struct ServiceCommands<'a> {
    api: &'a dyn PipelineApi,
    kind: &'static dyn ServiceKind,
    target: ClusterContext,
}

impl<'a> ServiceCommands<'a> {
    pub fn new(api: &'a dyn PipelineApi, kind: &'static dyn ServiceKind, target: ClusterContext) -> Self {
        Self { api, kind, target }
    }

    pub async fn activate(
        &self,
        source: &RequestSource,
        prompter: &dyn Prompter,
        stdin: &mut dyn Read,
    ) -> Result<String, CliError> {
        let workflow = ActivateWorkflow::new(self.api, self.kind, self.target);
        run_workflow(&workflow, source, prompter, stdin).await
    }

    pub async fn update(
        &self,
        source: &RequestSource,
        prompter: &dyn Prompter,
        stdin: &mut dyn Read,
    ) -> Result<String, CliError> {
        let workflow = UpdateWorkflow::new(self.api, self.kind, self.target);
        run_workflow(&workflow, source, prompter, stdin).await
    }

    pub async fn get(&self) -> Result<IntegratedServiceDetails, CliError> {
        check_service_enabled(self.api, self.kind).await?;
        self.api
            .service_details(
                self.target.organization_id,
                self.target.cluster_id,
                self.kind.service_name(),
            )
            .await
            .map_err(|e| e.context("failed to get service details"))
    }

    /// Remove the service from the cluster.
    ///
    /// Without `force` the operator is asked first, which requires an interactive session.
    pub async fn deactivate(
        &self,
        force: bool,
        interactive: bool,
        prompter: &dyn Prompter,
    ) -> Result<String, CliError> {
        let readable = self.kind.readable_name();
        check_service_enabled(self.api, self.kind).await?;

        if !force {
            if !interactive {
                return Err(CliError::Usage(format!(
                    "refusing to deactivate the {} service without confirmation; pass --force",
                    readable
                )));
            }
            let question = format!("Do you want to deactivate the {} service?", readable);
            if !prompter.confirm(&question, false)? {
                return Ok(format!("service {:?} left active", readable));
            }
        }

        let operation = format!("deactivate {} cluster service", readable);
        let call = self.api.deactivate_service(
            self.target.organization_id,
            self.target.cluster_id,
            self.kind.service_name(),
        );
        crate::lifecycle::submit(&operation, &Value::Null, call).await?;

        let report = format!("service {:?} started to deactivate", readable);
        info!("{}", report);
        Ok(report)
    }
}

/// Check a request document against the local rules without contacting the platform.
pub fn validate_request(
    kind: &dyn ServiceKind,
    file: Option<PathBuf>,
    interactive: bool,
    stdin: &mut dyn Read,
) -> Result<String, CliError> {
    // A terminal on standard input has no document to read.
    let source = RequestSource::new(file, interactive);
    let request: ActivateIntegratedServiceRequest = source
        .resolve(stdin)
        .map_err(|e| e.context(format!("failed to read {} cluster service specification", kind.readable_name())))?
        .ok_or_else(|| CliError::Usage("pass -f FILE or pipe a document".to_string()))?;
    kind.validate_spec(&Value::Object(request.spec))
        .map_err(|e| CliError::Validation(e.to_string()))?;
    Ok(format!("{} cluster service specification is valid", kind.readable_name()))
}

/// Integrated services of a cluster keyed by service name.
pub async fn list_services(
    api: &dyn PipelineApi,
    target: ClusterContext,
) -> Result<BTreeMap<String, IntegratedServiceDetails>, CliError> {
    api.list_services(target.organization_id, target.cluster_id)
        .await
        .map_err(|e| e.context("failed to list cluster services"))
}
