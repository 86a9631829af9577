//! Configuration System
//!
//! Layered client configuration: built-in defaults, the global config file, an explicit
//! `--config` file and `PIPECTL_*` environment variables, in increasing precedence.
//! Read-only for the lifetime of a command.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Base URL of the Pipeline API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,

    /// Organization used when no `--organization` flag is given
    #[serde(default)]
    pub organization_id: Option<u32>,

    /// Never prompt, even when stdin is a terminal
    #[serde(default)]
    pub no_interactive: bool,

    /// Editor executable; `$VISUAL`/`$EDITOR` when unset
    #[serde(default)]
    pub editor: Option<String>,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP client timeouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:9090/pipeline".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            organization_id: None,
            no_interactive: false,
            editor: None,
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            errors.push(format!(
                "endpoint '{}' must be an http:// or https:// URL",
                self.endpoint
            ));
        }
        if self.http.connect_timeout_secs == 0 {
            errors.push("http.connect_timeout_secs must be greater than 0".to_string());
        }
        if self.http.request_timeout_secs == 0 {
            errors.push("http.request_timeout_secs must be greater than 0".to_string());
        }
        if matches!(self.token.as_deref(), Some(t) if t.trim().is_empty()) {
            errors.push("token must not be blank".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
