//! Merge rules: defaults applied before any file or environment source.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Create a Config builder with the built-in defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("endpoint", "http://localhost:9090/pipeline")?
        .set_default("no_interactive", false)?
        .set_default("http.connect_timeout_secs", 10)?
        .set_default("http.request_timeout_secs", 60)
}
