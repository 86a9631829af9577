//! Integrated service presentation: list and details.

use super::{new_table, to_json};
use crate::api::IntegratedServiceDetails;
use crate::error::CliError;
use serde_json::Value;
use std::collections::BTreeMap;

pub fn format_service_list(
    services: &BTreeMap<String, IntegratedServiceDetails>,
    format: &str,
) -> Result<String, CliError> {
    if format == "json" {
        return to_json(services);
    }
    if services.is_empty() {
        return Ok("No services found.".to_string());
    }
    let mut table = new_table(vec!["Service", "Status"]);
    for (name, details) in services {
        table.add_row(vec![name.as_str(), status_or_dash(&details.status)]);
    }
    Ok(table.to_string())
}

pub fn format_service_details(
    readable_name: &str,
    details: &IntegratedServiceDetails,
    format: &str,
) -> Result<String, CliError> {
    if format == "json" {
        return to_json(details);
    }
    let mut lines = vec![
        format!("Service: {}", readable_name),
        format!("Status:  {}", status_or_dash(&details.status)),
        String::new(),
        "Spec:".to_string(),
        indent(&to_json(&Value::Object(details.spec.clone()))?),
    ];
    if !details.output.is_empty() {
        lines.push(String::new());
        lines.push("Output:".to_string());
        lines.push(indent(&to_json(&Value::Object(details.output.clone()))?));
    }
    Ok(lines.join("\n"))
}

fn status_or_dash(status: &str) -> &str {
    if status.is_empty() {
        "-"
    } else {
        status
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
