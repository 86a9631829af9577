//! ConfigLoader: the single entry point that layers every source into a PipelineConfig.

use super::{merge, sources, PipelineConfig};
use crate::error::CliError;
use config::File;
use std::path::Path;

/// Loads and validates the client configuration.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global file, an optional explicit file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<PipelineConfig, CliError> {
        let mut builder = merge::builder_with_defaults()?;
        builder = sources::global_file::add_to_builder(builder)?;
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path));
        }
        builder = sources::environment::add_to_builder(builder);

        let config: PipelineConfig = builder.build()?.try_deserialize()?;
        Self::validated(config)
    }

    /// Load defaults plus a single file, ignoring the global file and environment.
    pub fn load_from_file(path: &Path) -> Result<PipelineConfig, CliError> {
        let config: PipelineConfig = merge::builder_with_defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        Self::validated(config)
    }

    fn validated(config: PipelineConfig) -> Result<PipelineConfig, CliError> {
        config.validate().map_err(|errors| {
            CliError::Config(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            ))
        })?;
        Ok(config)
    }
}
