//! Logging: log collection, Loki and shipping to an object store bucket.

use super::ask::{ask_bool, ask_choice, ask_optional, ask_string, Choice};
use super::monitoring::IngressSpec;
use super::{field_error, TypedService};
use crate::error::CliError;
use crate::lifecycle::SpecError;
use crate::prompt::Prompter;
use serde::{Deserialize, Serialize};

/// Object store receiving the cluster output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputProvider {
    #[default]
    S3,
    Gcs,
    Azure,
    Oss,
}

impl Choice for OutputProvider {
    const ALL: &'static [Self] = &[
        OutputProvider::S3,
        OutputProvider::Gcs,
        OutputProvider::Azure,
        OutputProvider::Oss,
    ];

    fn label(&self) -> &'static str {
        match self {
            OutputProvider::S3 => "Amazon S3",
            OutputProvider::Gcs => "Google Cloud Storage",
            OutputProvider::Azure => "Azure Blob Storage",
            OutputProvider::Oss => "Alibaba OSS",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingSettings {
    #[serde(default)]
    pub metrics: bool,
    #[serde(default)]
    pub tls: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LokiSpec {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub ingress: IngressSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputProviderSpec {
    pub name: OutputProvider,
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub secret_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOutputSpec {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<OutputProviderSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingSpec {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub loki: LokiSpec,
    #[serde(default)]
    pub cluster_output: ClusterOutputSpec,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingService;

impl TypedService for LoggingService {
    type Spec = LoggingSpec;

    const READABLE_NAME: &'static str = "Logging";
    const SERVICE_NAME: &'static str = "logging";

    fn check(spec: &LoggingSpec) -> Result<(), SpecError> {
        let loki = &spec.loki;
        if loki.enabled && loki.ingress.enabled && !loki.ingress.path.starts_with('/') {
            return Err(field_error("loki.ingress.path", "must start with \"/\""));
        }

        let output = &spec.cluster_output;
        if !output.enabled {
            return Ok(());
        }
        let provider = output
            .provider
            .as_ref()
            .ok_or_else(|| field_error("clusterOutput.provider", "is required when enabled"))?;
        if provider.bucket.trim().is_empty() {
            return Err(field_error("clusterOutput.provider.bucket", "must not be empty"));
        }
        if provider.secret_id.trim().is_empty() {
            return Err(field_error("clusterOutput.provider.secretId", "must not be empty"));
        }
        Ok(())
    }

    fn ask(&self, prompter: &dyn Prompter, mut spec: LoggingSpec) -> Result<LoggingSpec, CliError> {
        spec.logging.metrics = ask_bool(prompter, "Enable logging metrics?", spec.logging.metrics)?;
        spec.logging.tls = ask_bool(prompter, "Enable TLS between log collectors?", spec.logging.tls)?;

        let loki = &mut spec.loki;
        loki.enabled = ask_bool(prompter, "Enable Loki?", loki.enabled)?;
        if loki.enabled {
            loki.ingress.enabled = ask_bool(prompter, "Expose Loki through an ingress?", loki.ingress.enabled)?;
            if loki.ingress.enabled {
                loki.ingress.domain = ask_optional(
                    prompter,
                    "Loki ingress domain (empty for any)",
                    loki.ingress.domain.as_deref(),
                )?;
                let path = if loki.ingress.path.is_empty() {
                    "/loki"
                } else {
                    loki.ingress.path.as_str()
                };
                loki.ingress.path = ask_string(prompter, "Loki ingress path", path)?;
            }
        }

        let output = &mut spec.cluster_output;
        output.enabled = ask_bool(prompter, "Ship cluster logs to an object store?", output.enabled)?;
        if output.enabled {
            let mut provider = output.provider.take().unwrap_or_default();
            provider.name = ask_choice(prompter, "Object store provider", provider.name)?;
            provider.bucket = ask_string(prompter, "Bucket name", &provider.bucket)?;
            provider.secret_id = ask_string(prompter, "Secret ID for bucket access", &provider.secret_id)?;
            output.provider = Some(provider);
        }

        Ok(spec)
    }
}
