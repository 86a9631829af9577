//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::api::{PipelineApi, PipelineClient};
use crate::cli::help::{command_name, is_mutation};
use crate::cli::parse::{
    ClusterArgs, ClusterCommands, ClusterGroupCommands, ClusterServiceCommands, Commands,
    DeploymentVerb, ServiceVerb,
};
use crate::cli::presentation::{
    format_deployment_info, format_deployment_list, format_service_details, format_service_list,
    format_target_statuses,
};
use crate::clustergroup::DeploymentCommands;
use crate::config::PipelineConfig;
use crate::error::CliError;
use crate::lifecycle::RequestSource;
use crate::prompt::{is_interactive, Prompter, TerminalPrompter};
use crate::services::{self, list_services, validate_request, ServiceCommands, ServiceKind};
use crate::target::{ClusterContext, ClusterGroupContext};
use std::io::Read;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runtime context for CLI execution: the platform client, the prompt surface and the
/// session settings resolved from configuration.
pub struct RunContext {
    api: Box<dyn PipelineApi>,
    prompter: Box<dyn Prompter>,
    interactive: bool,
    organization_id: Option<u32>,
}

impl RunContext {
    /// Create the run context from the loaded configuration.
    pub fn new(config: &PipelineConfig) -> Result<Self, CliError> {
        let api = PipelineClient::new(config)?;
        let interactive = is_interactive(config.no_interactive);
        debug!(endpoint = %config.endpoint, interactive, "Run context created");
        Ok(Self::with_parts(
            Box::new(api),
            Box::new(TerminalPrompter::new(config.editor.clone())),
            interactive,
            config.organization_id,
        ))
    }

    /// Assemble a context from explicit parts.
    pub fn with_parts(
        api: Box<dyn PipelineApi>,
        prompter: Box<dyn Prompter>,
        interactive: bool,
        organization_id: Option<u32>,
    ) -> Self {
        Self {
            api,
            prompter,
            interactive,
            organization_id,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Execute a CLI command via the single route table.
    ///
    /// Request documents that are not given as a file are read from `stdin`.
    pub fn execute(&self, command: &Commands, stdin: &mut dyn Read) -> Result<String, CliError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::Transport(format!("failed to start async runtime: {}", e)))?;
        runtime.block_on(self.run(command, stdin))
    }

    /// Async form of [`RunContext::execute`] for callers that already own a runtime.
    pub async fn run(&self, command: &Commands, stdin: &mut dyn Read) -> Result<String, CliError> {
        let name = command_name(command);
        let started = Instant::now();
        debug!(command = %name, mutation = is_mutation(command), "Executing command");

        let result = match command {
            Commands::Cluster {
                command: ClusterCommands::Service { command },
            } => self.handle_cluster_service(command, stdin).await,
            Commands::ClusterGroup {
                command: ClusterGroupCommands::Deployment { command },
            } => self.handle_deployment(command, stdin).await,
        };

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => info!(command = %name, duration_ms, "Command completed"),
            Err(e) => warn!(command = %name, duration_ms, error = %e, "Command failed"),
        }
        result
    }

    async fn handle_cluster_service(
        &self,
        command: &ClusterServiceCommands,
        stdin: &mut dyn Read,
    ) -> Result<String, CliError> {
        if let ClusterServiceCommands::List { target, format } = command {
            let target = ClusterContext::resolve(self.organization_id, target.cluster_id)?;
            let services = list_services(self.api.as_ref(), target).await?;
            return format_service_list(&services, format);
        }
        let Some((service_name, verb)) = command.service() else {
            return Err(CliError::Usage("no service selected".to_string()));
        };
        let kind = services::lookup(service_name)
            .ok_or_else(|| CliError::Usage(format!("unknown service: {}", service_name)))?;
        let prompter = self.prompter.as_ref();

        match verb {
            ServiceVerb::Activate { target, file } => {
                let source = RequestSource::new(file.clone(), self.interactive);
                self.service_commands(kind, target)?
                    .activate(&source, prompter, stdin)
                    .await
            }
            ServiceVerb::Update { target, file } => {
                let source = RequestSource::new(file.clone(), self.interactive);
                self.service_commands(kind, target)?
                    .update(&source, prompter, stdin)
                    .await
            }
            ServiceVerb::Get { target, format } => {
                let details = self.service_commands(kind, target)?.get().await?;
                format_service_details(kind.readable_name(), &details, format)
            }
            ServiceVerb::Deactivate { target, force } => {
                self.service_commands(kind, target)?
                    .deactivate(*force, self.interactive, prompter)
                    .await
            }
            ServiceVerb::Validate { file } => {
                validate_request(kind, file.clone(), self.interactive, stdin)
            }
        }
    }

    fn service_commands(
        &self,
        kind: &'static dyn ServiceKind,
        args: &ClusterArgs,
    ) -> Result<ServiceCommands<'_>, CliError> {
        let target = ClusterContext::resolve(self.organization_id, args.cluster_id)?;
        Ok(ServiceCommands::new(self.api.as_ref(), kind, target))
    }

    async fn handle_deployment(
        &self,
        verb: &DeploymentVerb,
        stdin: &mut dyn Read,
    ) -> Result<String, CliError> {
        let cluster_group_id = match verb {
            DeploymentVerb::Create { target, .. }
            | DeploymentVerb::Update { target, .. }
            | DeploymentVerb::Get { target, .. }
            | DeploymentVerb::List { target, .. }
            | DeploymentVerb::Delete { target, .. }
            | DeploymentVerb::Sync { target, .. } => target.cluster_group_id,
        };
        let target = ClusterGroupContext::resolve(self.organization_id, cluster_group_id)?;
        let commands = DeploymentCommands::new(self.api.as_ref(), target);
        let prompter = self.prompter.as_ref();

        match verb {
            DeploymentVerb::Create { file, .. } => {
                let source = RequestSource::new(file.clone(), self.interactive);
                commands.create(&source, prompter, stdin).await
            }
            DeploymentVerb::Update { name, file, .. } => {
                let source = RequestSource::new(file.clone(), self.interactive);
                commands.update(name, &source, prompter, stdin).await
            }
            DeploymentVerb::Get { name, format, .. } => {
                let info = commands.get(name).await?;
                format_deployment_info(&info, format)
            }
            DeploymentVerb::List { format, .. } => {
                let deployments = commands.list().await?;
                format_deployment_list(&deployments, format)
            }
            DeploymentVerb::Delete {
                name,
                force_delete,
                yes,
                ..
            } => {
                match commands
                    .delete(name, *force_delete, *yes, self.interactive, prompter)
                    .await?
                {
                    Some(statuses) => Ok(format_target_statuses(
                        &format!("deployment {:?} deleted", name),
                        &statuses,
                    )),
                    None => Ok(format!("deployment {:?} kept", name)),
                }
            }
            DeploymentVerb::Sync { name, .. } => {
                let statuses = commands.sync(name).await?;
                Ok(format_target_statuses(
                    &format!("deployment {:?} synchronized", name),
                    &statuses,
                ))
            }
        }
    }
}
