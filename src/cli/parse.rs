//! CLI parse: clap types for Shipyard. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shipyard CLI - deployment-group node lookup
#[derive(Parser)]
#[command(name = "shipyard")]
#[command(about = "Resolve deployment-group node selectors against the provisioning service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (used to find config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile selectors into a node filter and print it
    Filter {
        /// JSON file holding an array of selectors
        #[arg(long)]
        selectors: PathBuf,
    },
    /// Resolve selectors into node names through the provisioning service
    Lookup {
        /// JSON file holding an array of selectors
        #[arg(long)]
        selectors: PathBuf,
        /// Design reference entries as <name>=<value> (repeatable)
        #[arg(long = "design-ref", required = true)]
        design_ref: Vec<String>,
        /// Provisioning API endpoint (overrides config)
        #[arg(long)]
        endpoint: Option<String>,
        /// Delay between attempts in seconds (overrides config)
        #[arg(long)]
        retry_delay_secs: Option<u64>,
        /// Workflow step the lookup is made for
        #[arg(long)]
        step: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
