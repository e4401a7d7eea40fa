//! CLI input checks.

use crate::error::ApiError;

/// Parse `<name>=<value>` parameters, splitting on the first `=`.
pub fn parse_key_value_params(params: &[String]) -> Result<Vec<(String, String)>, ApiError> {
    params
        .iter()
        .map(|param| match param.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
            _ => Err(ApiError::InvalidInput(format!(
                "Invalid parameter or parameter format for {}.  \
                 Please utilize the format: <parameter name>=<parameter value>",
                param
            ))),
        })
        .collect()
}

/// The provisioning endpoint must come from a flag or from configuration.
pub fn require_provisioning_endpoint(endpoint: Option<&str>) -> Result<&str, ApiError> {
    match endpoint {
        Some(endpoint) if !endpoint.trim().is_empty() => Ok(endpoint),
        _ => Err(ApiError::InvalidInput(
            "Missing the required provisioning variable: --endpoint \
             (or provisioning.endpoint in configuration)"
                .to_string(),
        )),
    }
}
