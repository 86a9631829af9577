//! Environment source: PIPECTL_ENDPOINT, PIPECTL_TOKEN, PIPECTL_HTTP__REQUEST_TIMEOUT_SECS, ...

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

pub const ENV_PREFIX: &str = "PIPECTL";

/// Add `PIPECTL_*` variables; `__` separates nested keys.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__"),
    )
}
