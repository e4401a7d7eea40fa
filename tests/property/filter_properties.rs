//! Property-based tests for node filter compilation

use proptest::prelude::*;
use shipyard::deployment_group::{compile_node_filter, GroupNodeSelector};

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,8}"
}

fn selector_strategy() -> impl Strategy<Value = GroupNodeSelector> {
    (
        prop::collection::vec(ident(), 0..4),
        prop::collection::vec((ident(), ident()), 0..4),
        prop::collection::vec(ident(), 0..4),
        prop::collection::vec(ident(), 0..4),
    )
        .prop_map(|(names, labels, tags, racks)| {
            let labels = labels
                .into_iter()
                .map(|(k, v)| format!("{}:{}", k, v))
                .collect();
            GroupNodeSelector::new(names, labels, tags, racks).unwrap()
        })
}

proptest! {
    /// Any number of vacuous selectors compiles to no filter.
    #[test]
    fn vacuous_selectors_never_filter(count in 0usize..8) {
        let selectors = vec![GroupNodeSelector::default(); count];
        prop_assert!(compile_node_filter(&selectors).is_none());
    }

    /// One clause per non-vacuous selector, in order, with lists copied verbatim.
    #[test]
    fn clauses_mirror_non_vacuous_selectors(selectors in prop::collection::vec(selector_strategy(), 0..6)) {
        let usable: Vec<&GroupNodeSelector> = selectors.iter().filter(|s| !s.is_vacuous()).collect();
        match compile_node_filter(&selectors) {
            None => prop_assert!(usable.is_empty()),
            Some(nf) => {
                prop_assert_eq!(nf.filter_set.len(), usable.len());
                for (clause, selector) in nf.filter_set.iter().zip(usable) {
                    prop_assert_eq!(&clause.node_names[..], selector.node_names());
                    prop_assert_eq!(&clause.node_tags[..], selector.node_tags());
                    prop_assert_eq!(&clause.rack_names[..], selector.rack_names());
                }
            }
        }
    }

    /// The label map holds each key once with the last value given for it.
    #[test]
    fn labels_keep_last_value_per_key(pairs in prop::collection::vec(("[a-c]", ident()), 1..8)) {
        let labels = pairs.iter().map(|(k, v)| format!(" {} : {} ", k, v)).collect();
        let selector = GroupNodeSelector::new(vec![], labels, vec![], vec![]).unwrap();
        let nf = compile_node_filter(&[selector]).unwrap();
        let node_labels = &nf.filter_set[0].node_labels;

        for (key, _) in &pairs {
            let last = pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.as_str());
            prop_assert_eq!(node_labels.get(key), last);
        }

        let mut distinct: Vec<&str> = Vec::new();
        for (key, _) in &pairs {
            if !distinct.contains(&key.as_str()) {
                distinct.push(key);
            }
        }
        let keys: Vec<&str> = node_labels.iter().map(|(k, _)| k).collect();
        prop_assert_eq!(keys, distinct);
    }
}
