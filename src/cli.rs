//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, is_mutation};
pub use output::map_error;
pub use parse::{
    Cli, ClusterArgs, ClusterCommands, ClusterGroupArgs, ClusterGroupCommands,
    ClusterServiceCommands, Commands, DeploymentVerb, ServiceVerb,
};
pub use presentation::{
    format_deployment_info, format_deployment_list, format_service_details, format_service_list,
    format_target_statuses,
};
pub use route::RunContext;
