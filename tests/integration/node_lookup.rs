//! Integration tests for the resilient node lookup

use super::test_utils::{design_ref, strings, ScriptedQuery, RecordingDelay};
use serde_json::json;
use shipyard::deployment_group::{DesignRef, GroupNodeSelector};
use shipyard::lookup::{NodeLookup, RetryPolicy};
use shipyard::{LookupError, LookupErrorKind};
use std::sync::Arc;
use std::time::Duration;

fn labelled_selector() -> GroupNodeSelector {
    GroupNodeSelector::new(
        vec![],
        strings(&["label1:label1"]),
        strings(&["tag1", "tag2"]),
        strings(&["rack3", "rack1"]),
    )
    .unwrap()
}

fn lookup_with(query: Arc<ScriptedQuery>, delay: Arc<RecordingDelay>) -> NodeLookup {
    NodeLookup::new(query, design_ref())
        .unwrap()
        .with_retry_delay(Duration::from_millis(100))
        .with_delay(delay)
}

#[tokio::test]
async fn test_lookup_returns_backend_nodes() {
    let query = Arc::new(ScriptedQuery::answering(&["node1", "node2"]));
    let delay = Arc::new(RecordingDelay::default());
    let nl = lookup_with(query.clone(), delay.clone());

    assert_eq!(nl.design_ref(), &design_ref());
    let nodes = nl.lookup(&[labelled_selector()]).await.unwrap();

    assert_eq!(nodes, strings(&["node1", "node2"]));
    assert_eq!(query.call_count(), 1);
    assert!(delay.waits().is_empty());
    assert_eq!(
        query.filters()[0],
        Some(json!({
            "filter_set": [{
                "filter_type": "intersection",
                "node_names": [],
                "node_tags": ["tag1", "tag2"],
                "rack_names": ["rack3", "rack1"],
                "node_labels": {"label1": "label1"}
            }],
            "filter_set_type": "union"
        }))
    );
}

#[tokio::test]
async fn test_vacuous_selectors_still_query_backend_without_filter() {
    let query = Arc::new(ScriptedQuery::answering(&["everything"]));
    let nl = lookup_with(query.clone(), Arc::new(RecordingDelay::default()));

    let nodes = nl
        .lookup(&[GroupNodeSelector::default(), GroupNodeSelector::default()])
        .await
        .unwrap();
    assert_eq!(nodes, strings(&["everything"]));

    let nodes = nl.lookup(&[]).await.unwrap();
    assert_eq!(nodes, strings(&["everything"]));

    assert_eq!(query.filters(), vec![None, None]);
}

#[tokio::test]
async fn test_client_error_is_retried_three_times() {
    let query = Arc::new(ScriptedQuery::failing(|| LookupError::Client("nope".to_string())));
    let delay = Arc::new(RecordingDelay::default());
    let nl = lookup_with(query.clone(), delay.clone());

    let err = nl.lookup(&[GroupNodeSelector::default()]).await.unwrap_err();

    assert_eq!(err.kind(), LookupErrorKind::Client);
    assert_eq!(err.to_string(), "Client error: nope");
    assert_eq!(query.call_count(), 3);
    assert_eq!(delay.waits(), vec![Duration::from_millis(100); 2]);
}

#[tokio::test]
async fn test_unclassified_error_is_retried_and_returned_unchanged() {
    #[derive(Debug)]
    struct Boom;
    impl std::fmt::Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "boom")
        }
    }
    impl std::error::Error for Boom {}

    let query = Arc::new(ScriptedQuery::failing(|| LookupError::unexpected(Boom)));
    let nl = lookup_with(query.clone(), Arc::new(RecordingDelay::default()));

    let err = nl.lookup(&[]).await.unwrap_err();
    assert_eq!(query.call_count(), 3);
    match err {
        LookupError::Unexpected(inner) => assert!(inner.downcast_ref::<Boom>().is_some()),
        other => panic!("expected unexpected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_last_error_is_the_one_returned() {
    let query = Arc::new(ScriptedQuery::new(
        vec![
            Err(LookupError::Client("first".to_string())),
            Err(LookupError::Client("second".to_string())),
            Err(LookupError::Client("third".to_string())),
        ],
        || Ok(vec![]),
    ));
    let nl = lookup_with(query.clone(), Arc::new(RecordingDelay::default()));

    let err = nl.lookup(&[]).await.unwrap_err();
    assert_eq!(err.to_string(), "Client error: third");
}

#[tokio::test]
async fn test_success_after_retries_stops_querying() {
    let query = Arc::new(ScriptedQuery::new(
        vec![Err(LookupError::Client("flaky".to_string()))],
        || Ok(vec!["node1".to_string()]),
    ));
    let delay = Arc::new(RecordingDelay::default());
    let nl = lookup_with(query.clone(), delay.clone());

    assert_eq!(nl.lookup(&[]).await.unwrap(), strings(&["node1"]));
    assert_eq!(query.call_count(), 2);
    assert_eq!(delay.waits().len(), 1);
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let query = Arc::new(ScriptedQuery::failing(|| LookupError::Unauthorized("nope".to_string())));
    let delay = Arc::new(RecordingDelay::default());
    let nl = lookup_with(query.clone(), delay.clone());

    let err = nl.lookup(&[GroupNodeSelector::default()]).await.unwrap_err();
    assert_eq!(err.kind(), LookupErrorKind::Unauthorized);
    assert_eq!(query.call_count(), 1);
    assert!(delay.waits().is_empty());
}

#[tokio::test]
async fn test_forbidden_is_not_retried() {
    let query = Arc::new(ScriptedQuery::failing(|| LookupError::Forbidden("nope".to_string())));
    let nl = lookup_with(query.clone(), Arc::new(RecordingDelay::default()));

    let err = nl.lookup(&[]).await.unwrap_err();
    assert_eq!(err.kind(), LookupErrorKind::Forbidden);
    assert_eq!(query.call_count(), 1);
}

#[tokio::test]
async fn test_forbidden_after_transient_failure_stops_immediately() {
    let query = Arc::new(ScriptedQuery::new(
        vec![Err(LookupError::Client("flaky".to_string()))],
        || Err(LookupError::Forbidden("nope".to_string())),
    ));
    let nl = lookup_with(query.clone(), Arc::new(RecordingDelay::default()));

    let err = nl.lookup(&[]).await.unwrap_err();
    assert_eq!(err.kind(), LookupErrorKind::Forbidden);
    assert_eq!(query.call_count(), 2);
}

#[test]
fn test_missing_design_ref_fails_before_any_query() {
    let query = Arc::new(ScriptedQuery::answering(&["node1"]));
    let err = NodeLookup::new(query.clone(), DesignRef::default()).unwrap_err();

    assert_eq!(err.kind(), LookupErrorKind::IncompleteDesignRef);
    assert!(err.to_string().contains("An incomplete design ref"));
    assert_eq!(query.call_count(), 0);
}

#[tokio::test]
async fn test_raw_selector_validation_happens_before_query() {
    let query = Arc::new(ScriptedQuery::answering(&["node1"]));
    let nl = lookup_with(query.clone(), Arc::new(RecordingDelay::default()));

    let err = nl.lookup_value(None).await.unwrap_err();
    assert!(err.to_string().contains("expected an iterable of selectors"));

    let err = nl.lookup_value(Some(&json!([{}, "bad!"]))).await.unwrap_err();
    assert!(err.to_string().contains("all elements must be selectors"));
    assert_eq!(query.call_count(), 0);

    let nodes = nl
        .lookup_value(Some(&json!([{"rack_names": ["RACK1"]}])))
        .await
        .unwrap();
    assert_eq!(nodes, strings(&["node1"]));
    assert_eq!(query.call_count(), 1);
}

#[tokio::test]
async fn test_custom_policy_changes_attempt_budget() {
    let query = Arc::new(ScriptedQuery::failing(|| LookupError::Client("nope".to_string())));
    let nl = NodeLookup::new(query.clone(), design_ref())
        .unwrap()
        .with_retry_policy(RetryPolicy {
            max_attempts: 5,
            delay: Duration::ZERO,
        })
        .with_delay(Arc::new(RecordingDelay::default()));

    assert!(nl.lookup(&[]).await.is_err());
    assert_eq!(query.call_count(), 5);
}

#[tokio::test]
async fn test_concurrent_lookups_share_one_lookup() {
    let query = Arc::new(ScriptedQuery::answering(&["node1"]));
    let nl = Arc::new(lookup_with(query.clone(), Arc::new(RecordingDelay::default())));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let nl = Arc::clone(&nl);
            tokio::spawn(async move { nl.lookup(&[labelled_selector()]).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), strings(&["node1"]));
    }
    assert_eq!(query.call_count(), 8);
}

#[tokio::test]
async fn test_lookup_all_preserves_group_order() {
    let query = Arc::new(ScriptedQuery::answering(&["node1"]));
    let nl = lookup_with(query.clone(), Arc::new(RecordingDelay::default()));

    let groups = vec![vec![labelled_selector()], vec![], vec![GroupNodeSelector::default()]];
    let results = nl.lookup_all(&groups).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(query.call_count(), 3);
}
