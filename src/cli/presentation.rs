//! CLI presentation: text and json formatters per command family.

mod deployment;
mod service;

pub use deployment::{
    format_deployment_info, format_deployment_list, format_target_statuses,
};
pub use service::{format_service_details, format_service_list};

use crate::error::CliError;
use serde::Serialize;

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Structural(format!("failed to render JSON: {}", e)))
}

pub(crate) fn new_table(header: Vec<&str>) -> comfy_table::Table {
    let mut table = comfy_table::Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(header);
    table
}
