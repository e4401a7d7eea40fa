//! Shipyard: deployment-group node lookup
//!
//! Resolves declarative deployment-group node selectors into concrete node
//! names by compiling them into a single provisioning-service node filter and
//! querying the service under a bounded retry policy.

pub mod cli;
pub mod config;
pub mod deployment_group;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod provisioning;

pub use deployment_group::{compile_node_filter, validate_selectors, DesignRef, GroupNodeSelector, NodeFilter};
pub use error::{is_fatal, ApiError, LookupError, LookupErrorKind};
pub use lookup::{NodeLookup, NodeQuery, RetryDelay, RetryPolicy};
