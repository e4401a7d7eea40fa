//! Configuration System
//!
//! Layered configuration for node lookups, the provisioning service client and
//! logging. Sources merge in order: built-in defaults, the global config file,
//! workspace config files, then `SHIPYARD__*` environment variables.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::lookup::RetryPolicy;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

mod merge;
mod sources;

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipyardConfig {
    /// Node lookup retry settings
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Provisioning service client settings
    #[serde(default)]
    pub provisioning: ProvisioningConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Node lookup retry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Total attempts per lookup, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay between attempts (seconds)
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

fn default_max_attempts() -> u32 {
    crate::lookup::DEFAULT_MAX_ATTEMPTS
}

fn default_retry_delay_secs() -> u64 {
    crate::lookup::DEFAULT_RETRY_DELAY.as_secs()
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

impl LookupConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            delay: Duration::from_secs(self.retry_delay_secs),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Provisioning service client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    /// Base URL of the provisioning API (e.g. http://drydock:9000/api/v1.0)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Pre-issued auth token sent with each request
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ProvisioningConfig {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!(
                    "endpoint '{}' must start with http:// or https://",
                    endpoint
                ));
            }
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("timeouts must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Lookup(String),
    Provisioning(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Lookup(msg) => write!(f, "Lookup: {}", msg),
            ValidationError::Provisioning(msg) => write!(f, "Provisioning: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ShipyardConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.lookup.validate() {
            errors.push(ValidationError::Lookup(e));
        }
        if let Err(e) = self.provisioning.validate() {
            errors.push(ValidationError::Provisioning(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding all problems into one error.
    pub fn validated(self) -> Result<Self, ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(self)
    }
}

/// Loads [`ShipyardConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace: defaults, global file, workspace
    /// files, then environment.
    pub fn load(workspace_root: &Path) -> Result<ShipyardConfig, ApiError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = builder.add_source(environment_source());

        let config: ShipyardConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from a single file, still honoring environment
    /// overrides.
    pub fn load_from_file(path: &Path) -> Result<ShipyardConfig, ApiError> {
        let path_str = path.to_str().ok_or_else(|| {
            ApiError::ConfigError(format!("Config path is not valid UTF-8: {:?}", path))
        })?;
        let config: ShipyardConfig = merge::merge_policy::builder_with_defaults()?
            .add_source(File::with_name(path_str).required(true))
            .add_source(environment_source())
            .build()?
            .try_deserialize()?;
        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Built-in defaults only.
    pub fn defaults() -> Result<ShipyardConfig, ApiError> {
        let config: Config = merge::merge_policy::builder_with_defaults()?.build()?;
        Ok(config.try_deserialize()?)
    }
}

fn environment_source() -> Environment {
    Environment::with_prefix("SHIPYARD")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
