//! Design reference: pointer into the site design that scopes a node query.

use crate::error::LookupError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignRef(Map<String, Value>);

impl DesignRef {
    /// Keys that must carry a non-null value before any node query is made.
    pub const REQUIRED_KEYS: &'static [&'static str] = &["design"];

    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build from `key`/`value` string pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Check that every required key is present and non-null.
    pub fn validate(&self) -> Result<(), LookupError> {
        let missing: Vec<&str> = Self::REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| self.0.get(*key).map_or(true, Value::is_null))
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(LookupError::IncompleteDesignRef(format!(
            "{} (missing: {})",
            Value::Object(self.0.clone()),
            missing.join(", ")
        )))
    }
}

impl From<Map<String, Value>> for DesignRef {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
