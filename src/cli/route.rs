//! CLI route: single route table and run context.

use crate::cli::checks::{parse_key_value_params, require_provisioning_endpoint};
use crate::cli::output::{format_node_filter, format_nodes_json, format_nodes_text};
use crate::cli::parse::Commands;
use crate::config::{ConfigLoader, ShipyardConfig};
use crate::deployment_group::steps::is_known_step;
use crate::deployment_group::{compile_node_filter, validate_selectors, DesignRef, GroupNodeSelector};
use crate::error::ApiError;
use crate::lookup::NodeLookup;
use crate::provisioning::ProvisioningClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, info_span};

/// Runtime context for CLI execution, built from the workspace and an
/// optional config path.
pub struct RunContext {
    config: ShipyardConfig,
}

impl RunContext {
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::from_config(config.validated()?))
    }

    pub fn from_config(config: ShipyardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShipyardConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Filter { selectors } => {
                let selectors = load_selectors(selectors)?;
                format_node_filter(compile_node_filter(&selectors).as_ref())
            }
            Commands::Lookup {
                selectors,
                design_ref,
                endpoint,
                retry_delay_secs,
                step,
                format,
            } => {
                if let Some(step) = step {
                    if !is_known_step(step) {
                        return Err(ApiError::InvalidInput(format!("Unknown workflow step: {}", step)));
                    }
                }
                if format != "text" && format != "json" {
                    return Err(ApiError::InvalidInput(format!(
                        "Invalid format: {} (must be 'text' or 'json')",
                        format
                    )));
                }

                let selectors = load_selectors(selectors)?;
                let design_ref = DesignRef::from_pairs(parse_key_value_params(design_ref)?);
                let lookup = self.build_lookup(design_ref, endpoint.as_deref(), *retry_delay_secs)?;

                let span = info_span!("lookup", step = step.as_deref().unwrap_or("-"));
                let _guard = span.enter();

                let runtime = tokio::runtime::Runtime::new()
                    .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;
                let nodes = runtime.block_on(lookup.lookup(&selectors))?;
                info!(nodes = nodes.len(), "Lookup complete");

                Ok(if format == "json" {
                    format_nodes_json(&nodes)
                } else {
                    format_nodes_text(&nodes)
                })
            }
        }
    }

    fn build_lookup(
        &self,
        design_ref: DesignRef,
        endpoint: Option<&str>,
        retry_delay_secs: Option<u64>,
    ) -> Result<NodeLookup, ApiError> {
        let mut provisioning = self.config.provisioning.clone();
        let endpoint =
            require_provisioning_endpoint(endpoint.or(provisioning.endpoint.as_deref()))?.to_string();
        provisioning.endpoint = Some(endpoint);
        let client = ProvisioningClient::from_config(&provisioning)?;

        let mut policy = self.config.lookup.retry_policy();
        if let Some(secs) = retry_delay_secs {
            policy.delay = Duration::from_secs(secs);
        }

        Ok(NodeLookup::new(Arc::new(client), design_ref)?.with_retry_policy(policy))
    }
}

/// Read a JSON selector file and validate its contents.
pub fn load_selectors(path: &Path) -> Result<Vec<GroupNodeSelector>, ApiError> {
    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
        ApiError::InvalidInput(format!("Selector file {} is not valid JSON: {}", path.display(), e))
    })?;
    Ok(validate_selectors(Some(&value))?)
}
