//! Deployment document rules and questions.

use crate::api::ClusterGroupDeployment;
use crate::error::CliError;
use crate::lifecycle::{SpecError, SpecValidator};
use crate::prompt::Prompter;
use crate::services::ask::{ask_bool, ask_list, ask_number, ask_optional, ask_string};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Default wait timeout offered when the operator asks to wait for the release.
const DEFAULT_TIMEOUT_SECS: i64 = 300;

#[derive(Debug, Clone, Copy, Default)]
pub struct DeploymentValidator;

impl DeploymentValidator {
    pub fn check(deployment: &ClusterGroupDeployment) -> Result<(), SpecError> {
        if deployment.release_name.trim().is_empty() {
            return Err(SpecError::new("releaseName: must not be empty"));
        }
        if deployment.name.trim().is_empty() {
            return Err(SpecError::new("name: chart reference must not be empty"));
        }
        if deployment.value_overrides.keys().any(|k| k.trim().is_empty()) {
            return Err(SpecError::new("valueOverrides: cluster names must not be empty"));
        }
        if matches!(deployment.timeout, Some(t) if t < 0) {
            return Err(SpecError::new("timeout: must not be negative"));
        }
        Ok(())
    }
}

impl SpecValidator for DeploymentValidator {
    fn validate_spec(&self, spec: &Value) -> Result<(), SpecError> {
        let deployment: ClusterGroupDeployment = serde_json::from_value(spec.clone())
            .map_err(|e| SpecError::new(format!("deployment is malformed: {}", e)))?;
        Self::check(&deployment)
    }
}

/// Ask for a deployment, starting from `seed` when updating an existing one.
///
/// The release name of a seeded deployment is kept; it identifies the deployment.
pub fn build_deployment(
    prompter: &dyn Prompter,
    seed: Option<ClusterGroupDeployment>,
) -> Result<ClusterGroupDeployment, CliError> {
    let seeded = seed.is_some();
    let mut deployment = seed.unwrap_or_default();

    if !seeded {
        deployment.release_name = ask_string(prompter, "Release name", &deployment.release_name)?;
    }
    deployment.name = ask_string(prompter, "Chart (e.g. stable/nginx)", &deployment.name)?;
    deployment.version = ask_optional(
        prompter,
        "Chart version (empty for latest)",
        deployment.version.as_deref(),
    )?;
    deployment.namespace = ask_optional(
        prompter,
        "Namespace (empty for default)",
        deployment.namespace.as_deref(),
    )?;

    let current: Vec<String> = deployment.value_overrides.keys().cloned().collect();
    let clusters = ask_list(
        prompter,
        "Clusters with value overrides (comma separated, empty for none)",
        &current,
    )?;
    let mut existing = std::mem::take(&mut deployment.value_overrides);
    deployment.value_overrides = clusters
        .into_iter()
        .map(|cluster| {
            let values = existing.remove(&cluster).unwrap_or_else(Map::new);
            (cluster, values)
        })
        .collect::<BTreeMap<_, _>>();

    if seeded {
        deployment.re_use_values =
            ask_bool(prompter, "Reuse the values of the current release?", deployment.re_use_values)?;
    }
    deployment.dry_run = ask_bool(prompter, "Dry run?", deployment.dry_run)?;
    deployment.wait = ask_bool(prompter, "Wait until the release is ready?", deployment.wait)?;
    if deployment.wait {
        let timeout = deployment.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);
        deployment.timeout = Some(ask_number(prompter, "Timeout (seconds)", timeout)?);
        deployment.atomic = ask_bool(prompter, "Roll back on failure?", deployment.atomic)?;
    }

    Ok(deployment)
}
