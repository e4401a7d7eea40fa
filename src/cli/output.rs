//! CLI output: node lists, compiled filters, and error mapping.

use crate::deployment_group::NodeFilter;
use crate::error::{ApiError, LookupError};
use serde_json::json;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Lookup(LookupError::Unauthorized(_)) | ApiError::Lookup(LookupError::Forbidden(_)) => {
            format!("{}\nCheck the provisioning token and its roles.", e)
        }
        _ => e.to_string(),
    }
}

pub fn format_nodes_text(nodes: &[String]) -> String {
    if nodes.is_empty() {
        return "No nodes matched.".to_string();
    }
    nodes.join("\n")
}

pub fn format_nodes_json(nodes: &[String]) -> String {
    json!({ "nodes": nodes, "count": nodes.len() }).to_string()
}

pub fn format_node_filter(filter: Option<&NodeFilter>) -> Result<String, ApiError> {
    match filter {
        Some(filter) => serde_json::to_string_pretty(filter)
            .map_err(|e| ApiError::InvalidInput(format!("Failed to render node filter: {}", e))),
        None => Ok("no filter".to_string()),
    }
}
