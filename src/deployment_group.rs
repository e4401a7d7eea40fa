//! Deployment groups: node selectors, their validation, and compilation into a
//! single provisioning-service node filter.

pub mod design_ref;
pub mod filter;
pub mod selector;
pub mod steps;
pub mod validate;

pub use design_ref::DesignRef;
pub use filter::{compile_node_filter, FilterClause, FilterSetType, FilterType, NodeFilter, NodeLabels};
pub use selector::{GroupNodeSelector, SelectorDocument};
pub use validate::validate_selectors;
