//! Integration tests for selector validation and node filter compilation

use super::test_utils::strings;
use serde_json::json;
use shipyard::deployment_group::{compile_node_filter, validate_selectors, GroupNodeSelector};

#[test]
fn test_selector_documents_compile_to_union_of_intersections() {
    let selectors = validate_selectors(Some(&json!([
        {
            "node_names": [],
            "node_labels": ["label1:label1"],
            "node_tags": ["tag1", "tag2"],
            "rack_names": ["rack3", "rack1"]
        },
        {
            "node_names": ["node1", "node2", "node3", "node4", "node5"],
            "node_labels": ["label1:label1", "label2:label2"],
            "node_tags": ["tag1", "tag2"],
            "rack_names": ["rack3", "rack1"]
        }
    ])))
    .unwrap();

    let nf = compile_node_filter(&selectors).unwrap();
    assert_eq!(
        serde_json::to_value(&nf).unwrap(),
        json!({
            "filter_set": [
                {
                    "filter_type": "intersection",
                    "node_names": [],
                    "node_tags": ["tag1", "tag2"],
                    "rack_names": ["rack3", "rack1"],
                    "node_labels": {"label1": "label1"}
                },
                {
                    "filter_type": "intersection",
                    "node_names": ["node1", "node2", "node3", "node4", "node5"],
                    "node_tags": ["tag1", "tag2"],
                    "rack_names": ["rack3", "rack1"],
                    "node_labels": {"label1": "label1", "label2": "label2"}
                }
            ],
            "filter_set_type": "union"
        })
    );
}

#[test]
fn test_vacuous_documents_are_dropped() {
    let selectors = validate_selectors(Some(&json!([
        {"rack_names": ["RACK1", "RACK2"]},
        {},
        {"node_names": [], "node_labels": [], "node_tags": [], "rack_names": []}
    ])))
    .unwrap();
    assert_eq!(selectors.len(), 3);

    let nf = compile_node_filter(&selectors).unwrap();
    assert_eq!(nf.filter_set.len(), 1);
    assert_eq!(nf.filter_set[0].rack_names, strings(&["RACK1", "RACK2"]));
    assert!(nf.filter_set[0].node_labels.is_empty());
}

#[test]
fn test_only_vacuous_documents_give_no_filter() {
    let selectors = validate_selectors(Some(&json!([{}, {}]))).unwrap();
    assert!(compile_node_filter(&selectors).is_none());
    assert_eq!(serde_json::to_value(compile_node_filter(&[])).unwrap(), json!(null));
}

#[test]
fn test_selector_round_trips_through_documents() {
    let sel = GroupNodeSelector::new(
        strings(&["n1"]),
        strings(&["control-plane: enabled"]),
        vec![],
        vec![],
    )
    .unwrap();
    let value = serde_json::to_value(&sel).unwrap();
    assert_eq!(value["node_labels"], json!(["control-plane:enabled"]));

    let back: GroupNodeSelector = serde_json::from_value(value).unwrap();
    assert_eq!(back, sel);
}
