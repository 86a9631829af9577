//! CLI command-name contract for logging (e.g. "cluster.service.dns.activate").

use crate::cli::parse::{ClusterCommands, ClusterGroupCommands, Commands, DeploymentVerb, ServiceVerb};

pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Cluster {
            command: ClusterCommands::Service { command },
        } => match command.service() {
            Some((service, verb)) => format!("cluster.service.{}.{}", service, service_verb_name(verb)),
            None => "cluster.service.list".to_string(),
        },
        Commands::ClusterGroup {
            command: ClusterGroupCommands::Deployment { command },
        } => format!("clustergroup.deployment.{}", deployment_verb_name(command)),
    }
}

pub fn service_verb_name(verb: &ServiceVerb) -> &'static str {
    match verb {
        ServiceVerb::Activate { .. } => "activate",
        ServiceVerb::Update { .. } => "update",
        ServiceVerb::Get { .. } => "get",
        ServiceVerb::Deactivate { .. } => "deactivate",
        ServiceVerb::Validate { .. } => "validate",
    }
}

pub fn deployment_verb_name(verb: &DeploymentVerb) -> &'static str {
    match verb {
        DeploymentVerb::Create { .. } => "create",
        DeploymentVerb::Update { .. } => "update",
        DeploymentVerb::Get { .. } => "get",
        DeploymentVerb::List { .. } => "list",
        DeploymentVerb::Delete { .. } => "delete",
        DeploymentVerb::Sync { .. } => "sync",
    }
}

/// Whether the command may change remote state.
pub fn is_mutation(command: &Commands) -> bool {
    match command {
        Commands::Cluster {
            command: ClusterCommands::Service { command },
        } => matches!(
            command.service(),
            Some((
                _,
                ServiceVerb::Activate { .. } | ServiceVerb::Update { .. } | ServiceVerb::Deactivate { .. }
            ))
        ),
        Commands::ClusterGroup {
            command: ClusterGroupCommands::Deployment { command },
        } => !matches!(command, DeploymentVerb::Get { .. } | DeploymentVerb::List { .. }),
    }
}
