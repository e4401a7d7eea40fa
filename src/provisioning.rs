//! Provisioning service client
//!
//! HTTP implementation of [`NodeQuery`] against the provisioning service's
//! node filter endpoint. Response statuses are mapped onto the lookup error
//! kinds so the retry loop can classify them.

use crate::config::ProvisioningConfig;
use crate::deployment_group::{DesignRef, NodeFilter};
use crate::error::{ApiError, LookupError};
use crate::lookup::NodeQuery;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

#[derive(Serialize)]
struct NodeFilterRequest<'a> {
    node_filter: Option<&'a NodeFilter>,
    design_ref: &'a DesignRef,
}

/// Client for the provisioning service.
pub struct ProvisioningClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ProvisioningClient {
    pub fn new(
        base_url: String,
        token: Option<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .no_proxy()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| {
                ApiError::ProvisioningClient(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Build a client from configuration; an endpoint is required.
    pub fn from_config(config: &ProvisioningConfig) -> Result<Self, ApiError> {
        let endpoint = config.endpoint.clone().ok_or_else(|| {
            ApiError::ConfigError("provisioning.endpoint is not configured".to_string())
        })?;
        Self::new(
            endpoint,
            config.token.clone(),
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn node_filter_url(&self) -> String {
        format!("{}/nodefilter", self.base_url)
    }
}

#[async_trait]
impl NodeQuery for ProvisioningClient {
    async fn get_nodes_for_filter(
        &self,
        design_ref: &DesignRef,
        node_filter: Option<&NodeFilter>,
    ) -> Result<Vec<String>, LookupError> {
        let url = self.node_filter_url();
        debug!(url = %url, filtered = node_filter.is_some(), "Posting node filter");

        let mut request = self.client.post(&url).json(&NodeFilterRequest {
            node_filter,
            design_ref,
        });
        if let Some(token) = &self.token {
            request = request.header(AUTH_TOKEN_HEADER, token);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, &body));
        }

        response
            .json::<Vec<String>>()
            .await
            .map_err(LookupError::unexpected)
    }
}

fn map_transport_error(error: reqwest::Error) -> LookupError {
    if error.is_timeout() {
        LookupError::Client(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        LookupError::Client(format!("Connection error: {}", error))
    } else {
        LookupError::Client(format!("HTTP error: {}", error))
    }
}

/// Map a non-success response status onto a lookup error kind.
pub fn map_status(status: StatusCode, body: &str) -> LookupError {
    match status.as_u16() {
        401 => LookupError::Unauthorized(format!("{}: {}", status, body)),
        403 => LookupError::Forbidden(format!("{}: {}", status, body)),
        _ => LookupError::Client(format!("Request failed with status {}: {}", status, body)),
    }
}
