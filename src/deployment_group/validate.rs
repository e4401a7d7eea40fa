//! Selector input validation for untyped (JSON) selector collections.

use crate::deployment_group::selector::GroupNodeSelector;
use crate::error::LookupError;
use serde_json::Value;
use tracing::debug;

/// Validate a raw selector collection and convert it to selectors.
///
/// The input must be a JSON array. Every element is checked; any element that
/// is not a well-formed selector document fails the whole collection with the
/// same message regardless of how many elements are bad.
pub fn validate_selectors(input: Option<&Value>) -> Result<Vec<GroupNodeSelector>, LookupError> {
    let elements = match input {
        Some(Value::Array(elements)) => elements,
        other => {
            return Err(LookupError::InvalidInput(format!(
                "node lookup expected an iterable of selectors, got {}",
                describe(other)
            )))
        }
    };

    let mut selectors = Vec::with_capacity(elements.len());
    let mut invalid = Vec::new();
    for (index, element) in elements.iter().enumerate() {
        match parse_element(element) {
            Some(selector) => selectors.push(selector),
            None => invalid.push(index),
        }
    }

    if !invalid.is_empty() {
        debug!(invalid = ?invalid, total = elements.len(), "Rejected selector input");
        return Err(LookupError::InvalidInput(
            "node lookup requires that all elements must be selectors".to_string(),
        ));
    }

    Ok(selectors)
}

fn parse_element(element: &Value) -> Option<GroupNodeSelector> {
    if !element.is_object() {
        return None;
    }
    serde_json::from_value(element.clone()).ok()
}

fn describe(input: Option<&Value>) -> &'static str {
    match input {
        None | Some(Value::Null) => "nothing",
        Some(Value::Bool(_)) => "a boolean",
        Some(Value::Number(_)) => "a number",
        Some(Value::String(_)) => "a string",
        Some(Value::Object(_)) => "an object",
        Some(Value::Array(_)) => "an array",
    }
}
