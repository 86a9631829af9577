//! Pipectl CLI Binary
//!
//! Command-line interface for Pipeline integrated services and cluster group deployments.

use clap::Parser;
use pipectl::cli::{Cli, RunContext};
use pipectl::config::{ConfigLoader, PipelineConfig};
use pipectl::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    let mut config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", pipectl::cli::map_error(&e));
            process::exit(e.exit_code());
        }
    };
    apply_cli_overrides(&cli, &mut config);
    if let Err(errors) = config.validate() {
        eprintln!("Configuration error: {}", errors.join("; "));
        process::exit(1);
    }

    let logging_config = build_logging_config(&cli, config.logging.clone());
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    debug!(command = %pipectl::cli::command_name(&cli.command), "Pipectl starting");

    let context = match RunContext::new(&config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing client: {}", e);
            eprintln!("{}", pipectl::cli::map_error(&e));
            process::exit(e.exit_code());
        }
    };

    let stdin = std::io::stdin();
    match context.execute(&cli.command, &mut stdin.lock()) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", pipectl::cli::map_error(&e));
            process::exit(e.exit_code());
        }
    }
}

/// Fold connection flags into the loaded configuration. Flags win over every config source.
fn apply_cli_overrides(cli: &Cli, config: &mut PipelineConfig) {
    if let Some(ref endpoint) = cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(ref token) = cli.token {
        config.token = Some(token.clone());
    }
    if let Some(organization) = cli.organization {
        config.organization_id = Some(organization);
    }
    if cli.no_interactive {
        config.no_interactive = true;
    }
}

/// Build logging configuration from CLI args on top of the config file's `[logging]` table.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    if config.enabled && config.output == "file" {
        if let Ok(path) =
            pipectl::logging::resolve_log_file_path(cli.log_file.clone(), config.file.clone())
        {
            config.file = Some(path);
        }
    } else if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
