//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("lookup.max_attempts", 3)?
        .set_default("lookup.retry_delay_secs", 10)?
        .set_default("provisioning.connect_timeout_secs", 10)?
        .set_default("provisioning.request_timeout_secs", 60)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
