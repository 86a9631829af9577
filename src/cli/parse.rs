//! CLI parse: clap types for pipectl. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// pipectl - manage integrated services and cluster group deployments
#[derive(Parser, Debug)]
#[command(name = "pipectl")]
#[command(about = "Manage integrated services and cluster group deployments on Pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Pipeline API endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// API token
    #[arg(long)]
    pub token: Option<String>,

    /// Organization ID
    #[arg(long)]
    pub organization: Option<u32>,

    /// Never prompt; read request documents from --file or standard input
    #[arg(long)]
    pub no_interactive: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cluster commands
    Cluster {
        #[command(subcommand)]
        command: ClusterCommands,
    },
    /// Cluster group commands
    #[command(name = "clustergroup")]
    ClusterGroup {
        #[command(subcommand)]
        command: ClusterGroupCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClusterCommands {
    /// Manage integrated services of a cluster
    Service {
        #[command(subcommand)]
        command: ClusterServiceCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClusterServiceCommands {
    /// List the services of a cluster
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        target: ClusterArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Monitoring (Grafana, Prometheus, Alertmanager, Pushgateway)
    Monitoring {
        #[command(subcommand)]
        command: ServiceVerb,
    },
    /// Logging (log collection, Loki, object store output)
    Logging {
        #[command(subcommand)]
        command: ServiceVerb,
    },
    /// DNS record management
    Dns {
        #[command(subcommand)]
        command: ServiceVerb,
    },
    /// Automatic cluster expiry
    Expiry {
        #[command(subcommand)]
        command: ServiceVerb,
    },
}

impl ClusterServiceCommands {
    /// Service name and verb, unless this is the service list.
    pub fn service(&self) -> Option<(&'static str, &ServiceVerb)> {
        match self {
            ClusterServiceCommands::List { .. } => None,
            ClusterServiceCommands::Monitoring { command } => Some(("monitoring", command)),
            ClusterServiceCommands::Logging { command } => Some(("logging", command)),
            ClusterServiceCommands::Dns { command } => Some(("dns", command)),
            ClusterServiceCommands::Expiry { command } => Some(("expiry", command)),
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct ClusterArgs {
    /// Cluster ID
    #[arg(long)]
    pub cluster_id: u32,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct ClusterGroupArgs {
    /// Cluster group ID
    #[arg(long)]
    pub cluster_group_id: u32,
}

#[derive(Subcommand, Debug)]
pub enum ServiceVerb {
    /// Activate the service on a cluster
    #[command(visible_aliases = ["add", "enable", "install", "on"])]
    Activate {
        #[command(flatten)]
        target: ClusterArgs,
        /// Service specification file ("-" for standard input)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Update the service of a cluster
    #[command(visible_aliases = ["change", "modify", "set"])]
    Update {
        #[command(flatten)]
        target: ClusterArgs,
        /// Service specification file ("-" for standard input)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Show the service details
    Get {
        #[command(flatten)]
        target: ClusterArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Deactivate the service of a cluster
    #[command(visible_aliases = ["disable", "off", "remove", "uninstall"])]
    Deactivate {
        #[command(flatten)]
        target: ClusterArgs,
        /// Do not ask for confirmation
        #[arg(long)]
        force: bool,
    },
    /// Check a service specification locally
    Validate {
        /// Service specification file ("-" or omitted for standard input)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClusterGroupCommands {
    /// Manage deployments of a cluster group
    Deployment {
        #[command(subcommand)]
        command: DeploymentVerb,
    },
}

#[derive(Subcommand, Debug)]
pub enum DeploymentVerb {
    /// Create a deployment
    #[command(visible_aliases = ["add", "install"])]
    Create {
        #[command(flatten)]
        target: ClusterGroupArgs,
        /// Deployment request file ("-" for standard input)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Update a deployment
    #[command(visible_aliases = ["change", "modify", "set"])]
    Update {
        /// Deployment (release) name
        name: String,
        #[command(flatten)]
        target: ClusterGroupArgs,
        /// Deployment request file ("-" for standard input)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Show a deployment and its status on each member cluster
    Get {
        name: String,
        #[command(flatten)]
        target: ClusterGroupArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// List deployments
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        target: ClusterGroupArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Delete a deployment from every member cluster
    #[command(visible_aliases = ["rm", "remove"])]
    Delete {
        name: String,
        #[command(flatten)]
        target: ClusterGroupArgs,
        /// Delete even if removal fails on some member clusters
        #[arg(long)]
        force_delete: bool,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Reinstall a deployment on member clusters where it drifted
    Sync {
        name: String,
        #[command(flatten)]
        target: ClusterGroupArgs,
    },
}
