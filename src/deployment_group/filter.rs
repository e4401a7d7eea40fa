//! Node filter compilation
//!
//! Merges a sequence of selectors into the provisioning service's node filter:
//! a union of intersection clauses, one clause per selector that carries at
//! least one criterion.

use crate::deployment_group::selector::GroupNodeSelector;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

/// How the clauses of a filter set combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterSetType {
    Union,
}

/// How the criteria within one clause combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Intersection,
}

/// Label criteria of one clause, kept in first-insertion order.
///
/// Inserting an existing key replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeLabels {
    entries: Vec<(String, String)>,
}

impl NodeLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for NodeLabels {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut labels = NodeLabels::new();
        for (key, value) in iter {
            labels.insert(key.to_string(), value.to_string());
        }
        labels
    }
}

impl Serialize for NodeLabels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One intersection clause: a node matches when it satisfies every criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterClause {
    pub filter_type: FilterType,
    pub node_names: Vec<String>,
    pub node_tags: Vec<String>,
    pub rack_names: Vec<String>,
    pub node_labels: NodeLabels,
}

impl FilterClause {
    fn from_selector(selector: &GroupNodeSelector) -> Self {
        let mut node_labels = NodeLabels::new();
        for (key, value) in selector.node_labels() {
            node_labels.insert(key.clone(), value.clone());
        }

        Self {
            filter_type: FilterType::Intersection,
            node_names: selector.node_names().to_vec(),
            node_tags: selector.node_tags().to_vec(),
            rack_names: selector.rack_names().to_vec(),
            node_labels,
        }
    }
}

/// Node filter sent to the provisioning service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeFilter {
    pub filter_set: Vec<FilterClause>,
    pub filter_set_type: FilterSetType,
}

/// Compile selectors into a node filter.
///
/// Vacuous selectors are dropped. Returns `None` when no selector carries any
/// criteria (including an empty input), meaning the query is unconstrained.
pub fn compile_node_filter(selectors: &[GroupNodeSelector]) -> Option<NodeFilter> {
    let filter_set: Vec<FilterClause> = selectors
        .iter()
        .filter(|selector| !selector.is_vacuous())
        .map(FilterClause::from_selector)
        .collect();

    debug!(
        selectors = selectors.len(),
        clauses = filter_set.len(),
        "Compiled node filter"
    );

    if filter_set.is_empty() {
        return None;
    }

    Some(NodeFilter {
        filter_set,
        filter_set_type: FilterSetType::Union,
    })
}
