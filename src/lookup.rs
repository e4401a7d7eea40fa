//! Resilient node lookup
//!
//! Resolves deployment-group selectors into node names by compiling them into
//! a node filter and querying the provisioning service under a bounded retry
//! policy. Authorization failures end the lookup immediately; every other
//! failure is retried after a delay until the attempt budget is spent, and the
//! last error is returned as-is.

pub mod query;
pub mod retry;

pub use query::{resolve_once, NodeQuery};
pub use retry::{
    LookupAttempt, NoDelay, RetryDecision, RetryDelay, RetryPolicy, StopReason, TokioDelay,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY,
};

use crate::deployment_group::{compile_node_filter, validate_selectors, DesignRef, GroupNodeSelector};
use crate::error::LookupError;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Node lookup bound to one query capability and one design reference.
///
/// Holds no per-call state; a single instance can serve concurrent lookups.
#[derive(Clone)]
pub struct NodeLookup {
    query: Arc<dyn NodeQuery>,
    design_ref: DesignRef,
    policy: RetryPolicy,
    delay: Arc<dyn RetryDelay>,
}

impl std::fmt::Debug for NodeLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeLookup")
            .field("design_ref", &self.design_ref)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl NodeLookup {
    /// Create a lookup. The design reference is checked here, once, so an
    /// incomplete reference fails before any query is attempted.
    pub fn new(query: Arc<dyn NodeQuery>, design_ref: DesignRef) -> Result<Self, LookupError> {
        design_ref.validate()?;
        Ok(Self {
            query,
            design_ref,
            policy: RetryPolicy::default(),
            delay: Arc::new(TokioDelay),
        })
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.policy.delay = delay;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the mechanism used to wait between attempts.
    pub fn with_delay(mut self, delay: Arc<dyn RetryDelay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn design_ref(&self) -> &DesignRef {
        &self.design_ref
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Validate a raw selector collection, then look up its nodes.
    ///
    /// Invalid input is reported without contacting the backend.
    pub async fn lookup_value(&self, selectors: Option<&Value>) -> Result<Vec<String>, LookupError> {
        let selectors = validate_selectors(selectors)?;
        self.lookup(&selectors).await
    }

    /// Resolve the nodes matched by any of the selectors.
    ///
    /// The backend is queried even when no selector carries criteria; the
    /// query is then sent without a filter.
    pub async fn lookup(&self, selectors: &[GroupNodeSelector]) -> Result<Vec<String>, LookupError> {
        let node_filter = compile_node_filter(selectors);
        if node_filter.is_none() {
            debug!("No selector criteria; querying without a node filter");
        }

        let mut attempt = LookupAttempt::start(&self.policy);
        loop {
            debug!(
                attempt = attempt.attempt_number(),
                max_attempts = attempt.max_attempts(),
                "Querying nodes for filter"
            );

            let err = match resolve_once(self.query.as_ref(), &self.design_ref, node_filter.as_ref()).await {
                Ok(nodes) => {
                    info!(
                        nodes = nodes.len(),
                        attempt = attempt.attempt_number(),
                        "Resolved deployment group nodes"
                    );
                    return Ok(nodes);
                }
                Err(err) => err,
            };

            let failed_attempt = attempt.attempt_number();
            match attempt.record_failure(err) {
                RetryDecision::Retry { delay } => {
                    warn!(
                        attempt = failed_attempt,
                        max_attempts = attempt.max_attempts(),
                        delay = ?delay,
                        error = ?attempt.last_error(),
                        "Node lookup failed; retrying"
                    );
                    self.delay.wait(delay).await;
                }
                RetryDecision::Stop { reason: StopReason::Fatal, error } => {
                    error!(attempt = failed_attempt, error = %error, "Node lookup not authorized");
                    return Err(error);
                }
                RetryDecision::Stop { reason: StopReason::Exhausted, error } => {
                    error!(
                        attempts = failed_attempt,
                        error = %error,
                        "Node lookup failed after all attempts"
                    );
                    return Err(error);
                }
            }
        }
    }

    /// Resolve several groups concurrently, returning node lists in input order.
    pub async fn lookup_all(
        &self,
        groups: &[Vec<GroupNodeSelector>],
    ) -> Result<Vec<Vec<String>>, LookupError> {
        futures::future::try_join_all(groups.iter().map(|selectors| self.lookup(selectors))).await
    }
}
