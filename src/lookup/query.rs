//! Remote node resolution through an injected query capability.

use crate::deployment_group::{DesignRef, NodeFilter};
use crate::error::LookupError;
use async_trait::async_trait;
use std::sync::Arc;

/// Capability to ask the provisioning service which nodes match a filter.
///
/// `None` for the filter means the query is unconstrained. Implementations
/// report failures through the [`LookupError`] kinds so the caller can tell
/// authorization failures from transient ones.
#[async_trait]
pub trait NodeQuery: Send + Sync {
    async fn get_nodes_for_filter(
        &self,
        design_ref: &DesignRef,
        node_filter: Option<&NodeFilter>,
    ) -> Result<Vec<String>, LookupError>;
}

#[async_trait]
impl<T: NodeQuery + ?Sized> NodeQuery for Arc<T> {
    async fn get_nodes_for_filter(
        &self,
        design_ref: &DesignRef,
        node_filter: Option<&NodeFilter>,
    ) -> Result<Vec<String>, LookupError> {
        (**self).get_nodes_for_filter(design_ref, node_filter).await
    }
}

/// Issue one query. Errors come back exactly as the capability raised them.
pub async fn resolve_once(
    query: &dyn NodeQuery,
    design_ref: &DesignRef,
    node_filter: Option<&NodeFilter>,
) -> Result<Vec<String>, LookupError> {
    query.get_nodes_for_filter(design_ref, node_filter).await
}
