//! Wire models for the Pipeline API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Free-form specification payload; its shape is defined per service kind.
pub type Spec = Map<String, Value>;

/// Request body for activating an integrated service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivateIntegratedServiceRequest {
    pub spec: Spec,
}

/// Request body for updating an integrated service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateIntegratedServiceRequest {
    pub spec: Spec,
}

/// Persisted state of an integrated service on a cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegratedServiceDetails {
    #[serde(default)]
    pub spec: Spec,
    #[serde(default)]
    pub output: Map<String, Value>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityStatus {
    #[serde(default)]
    pub enabled: bool,
}

/// Capability groups reported by the platform, e.g. `integratedservices.monitoring`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(pub HashMap<String, HashMap<String, CapabilityStatus>>);

impl Capabilities {
    pub const INTEGRATED_SERVICES: &'static str = "integratedservices";

    pub fn is_enabled(&self, group: &str, name: &str) -> bool {
        self.0
            .get(group)
            .and_then(|entries| entries.get(name))
            .map(|status| status.enabled)
            .unwrap_or(false)
    }
}

/// Error body returned by the platform on rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CommonError {
    /// Human-readable description, if the body carried one.
    pub fn description(&self) -> Option<&str> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}

/// Create or update request for a cluster group deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterGroupDeployment {
    /// Release name; also the deployment name in resource paths
    pub release_name: String,
    /// Chart reference, e.g. `stable/nginx`
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub values: Map<String, Value>,
    /// Per member cluster value overrides keyed by cluster name
    #[serde(default)]
    pub value_overrides: BTreeMap<String, Map<String, Value>>,
    #[serde(default)]
    pub re_use_values: bool,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub wait: bool,
    #[serde(default)]
    pub atomic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
}

/// Deployment status on one member cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetClusterStatus {
    #[serde(default)]
    pub cluster_id: i64,
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateDeploymentResponse {
    #[serde(default)]
    pub release_name: String,
    #[serde(default)]
    pub target_clusters: Vec<TargetClusterStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDeploymentResponse {
    #[serde(default)]
    pub release_name: String,
    #[serde(default)]
    pub chart_name: String,
    #[serde(default)]
    pub chart_version: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Full view of a cluster group deployment and its status on each member cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    #[serde(default)]
    pub release_name: String,
    #[serde(default)]
    pub chart: String,
    #[serde(default)]
    pub chart_version: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub values: Map<String, Value>,
    #[serde(default)]
    pub value_overrides: BTreeMap<String, Map<String, Value>>,
    #[serde(default)]
    pub target_clusters: Vec<TargetClusterStatus>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl DeploymentInfo {
    /// Seed an update request from the deployment's current state.
    pub fn to_update_request(&self) -> ClusterGroupDeployment {
        ClusterGroupDeployment {
            release_name: self.release_name.clone(),
            name: self.chart.clone(),
            version: Some(self.chart_version.clone()).filter(|v| !v.is_empty()),
            namespace: Some(self.namespace.clone()).filter(|n| !n.is_empty()),
            values: self.values.clone(),
            value_overrides: self.value_overrides.clone(),
            ..ClusterGroupDeployment::default()
        }
    }
}
