//! Group node selector: the declarative criteria for one group of nodes.

use crate::error::LookupError;
use serde::{Deserialize, Serialize};

/// Raw selector document as written in deployment-group configuration.
///
/// Every field is optional and defaults to empty. Labels are `"key:value"`
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectorDocument {
    #[serde(default)]
    pub node_names: Vec<String>,
    #[serde(default)]
    pub node_labels: Vec<String>,
    #[serde(default)]
    pub node_tags: Vec<String>,
    #[serde(default)]
    pub rack_names: Vec<String>,
}

/// Selector describing one group of nodes by name, label, tag and rack.
///
/// Immutable once built. Labels are parsed at construction so a malformed
/// entry is rejected here rather than during filter compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectorDocument", into = "SelectorDocument")]
pub struct GroupNodeSelector {
    node_names: Vec<String>,
    node_labels: Vec<(String, String)>,
    node_tags: Vec<String>,
    rack_names: Vec<String>,
}

impl GroupNodeSelector {
    /// Build a selector, parsing each `"key:value"` label entry.
    pub fn new(
        node_names: Vec<String>,
        node_labels: Vec<String>,
        node_tags: Vec<String>,
        rack_names: Vec<String>,
    ) -> Result<Self, LookupError> {
        let node_labels = node_labels
            .iter()
            .map(|label| parse_label(label))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            node_names,
            node_labels,
            node_tags,
            rack_names,
        })
    }

    pub fn node_names(&self) -> &[String] {
        &self.node_names
    }

    /// Parsed labels in input order; duplicate keys are kept here.
    pub fn node_labels(&self) -> &[(String, String)] {
        &self.node_labels
    }

    pub fn node_tags(&self) -> &[String] {
        &self.node_tags
    }

    pub fn rack_names(&self) -> &[String] {
        &self.rack_names
    }

    /// True when the selector carries no criteria at all.
    pub fn is_vacuous(&self) -> bool {
        self.node_names.is_empty()
            && self.node_labels.is_empty()
            && self.node_tags.is_empty()
            && self.rack_names.is_empty()
    }
}

impl TryFrom<SelectorDocument> for GroupNodeSelector {
    type Error = LookupError;

    fn try_from(doc: SelectorDocument) -> Result<Self, Self::Error> {
        GroupNodeSelector::new(doc.node_names, doc.node_labels, doc.node_tags, doc.rack_names)
    }
}

impl From<GroupNodeSelector> for SelectorDocument {
    fn from(selector: GroupNodeSelector) -> Self {
        SelectorDocument {
            node_names: selector.node_names,
            node_labels: selector
                .node_labels
                .into_iter()
                .map(|(key, value)| format!("{}:{}", key, value))
                .collect(),
            node_tags: selector.node_tags,
            rack_names: selector.rack_names,
        }
    }
}

/// Split a label on its first `:` and trim both halves.
fn parse_label(label: &str) -> Result<(String, String), LookupError> {
    let (key, value) = label.split_once(':').ok_or_else(|| {
        LookupError::InvalidInput(format!(
            "node label '{}' must use the format <key>:<value>",
            label
        ))
    })?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}
