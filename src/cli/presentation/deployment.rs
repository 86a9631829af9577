//! Cluster group deployment presentation.

use super::{new_table, to_json};
use crate::api::{DeploymentInfo, ListDeploymentResponse, TargetClusterStatus};
use crate::error::CliError;

pub fn format_deployment_list(
    deployments: &[ListDeploymentResponse],
    format: &str,
) -> Result<String, CliError> {
    if format == "json" {
        return to_json(deployments);
    }
    if deployments.is_empty() {
        return Ok("No deployments found.".to_string());
    }
    let mut table = new_table(vec!["Release", "Chart", "Version", "Namespace", "Updated"]);
    for d in deployments {
        table.add_row(vec![
            d.release_name.as_str(),
            d.chart_name.as_str(),
            d.chart_version.as_str(),
            d.namespace.as_str(),
            d.updated_at.as_str(),
        ]);
    }
    Ok(table.to_string())
}

pub fn format_deployment_info(info: &DeploymentInfo, format: &str) -> Result<String, CliError> {
    if format == "json" {
        return to_json(info);
    }
    let mut s = format!(
        "Release:   {}\nChart:     {} {}\nNamespace: {}",
        info.release_name, info.chart, info.chart_version, info.namespace
    );
    if !info.target_clusters.is_empty() {
        s.push_str("\n\n");
        s.push_str(&status_table(&info.target_clusters));
    }
    Ok(s)
}

/// Per cluster outcome of a delete or sync.
pub fn format_target_statuses(headline: &str, statuses: &[TargetClusterStatus]) -> String {
    if statuses.is_empty() {
        return headline.to_string();
    }
    format!("{}\n{}", headline, status_table(statuses))
}

fn status_table(statuses: &[TargetClusterStatus]) -> String {
    let mut table = new_table(vec!["Cluster ID", "Cluster", "Status", "Error"]);
    for status in statuses {
        table.add_row(vec![
            status.cluster_id.to_string(),
            status.cluster_name.clone(),
            status.status.clone(),
            status.error.clone().unwrap_or_default(),
        ]);
    }
    table.to_string()
}
