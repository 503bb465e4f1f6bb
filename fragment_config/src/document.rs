//! The universal configuration document type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::merge::merge_maps;

/// A JSON object: unique string keys mapped to arbitrary JSON values.
///
/// Key order never affects equality, and [`ConfigDocument::to_canonical_json`]
/// always emits keys sorted at every depth, so equal documents serialise to
/// identical bytes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument(Map<String, Value>);

/// Raised when a JSON value other than an object is offered as a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a JSON object at the top level, found {found}")]
pub struct NonObjectDocument {
    /// JSON type that was found instead.
    pub found: &'static str,
}

impl ConfigDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Look up a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Resolve a JSON pointer (`/Auth/Authority`) against the document.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let rest = pointer.strip_prefix('/')?;
        let (head, tail) = rest
            .split_once('/')
            .map_or((rest, None), |(head, tail)| (head, Some(tail)));
        let key = head.replace("~1", "/").replace("~0", "~");
        let value = self.0.get(&key)?;
        tail.map_or(Some(value), |path| value.pointer(&format!("/{path}")))
    }

    /// Insert a top-level key, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Returns `true` when the top-level key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the document has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Top-level keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Borrow the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Deep-merge `other` on top of this document.
    ///
    /// See [`crate::merge`] for the rules.
    pub fn merge_from(&mut self, other: Self) {
        merge_maps(&mut self.0, other.0);
    }

    /// Serialise with sorted keys, two-space indentation and a trailing
    /// newline.
    ///
    /// # Errors
    ///
    /// Propagates serialisation failures from `serde_json`.
    pub fn to_canonical_json(&self) -> serde_json::Result<String> {
        let canonical = canonicalize(&Value::Object(self.0.clone()));
        let mut rendered = serde_json::to_string_pretty(&canonical)?;
        rendered.push('\n');
        Ok(rendered)
    }
}

/// Rebuild `value` with object keys inserted in sorted order at every depth.
///
/// Map ordering then no longer depends on how the document was built, even
/// when `serde_json` preserves insertion order.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, Value> = map
                .iter()
                .map(|(key, child)| (key, canonicalize(child)))
                .collect();
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(key, child)| (key.clone(), child))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

pub(crate) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl TryFrom<Value> for ConfigDocument {
    type Error = NonObjectDocument;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(NonObjectDocument {
                found: value_kind(&other),
            }),
        }
    }
}

impl From<Map<String, Value>> for ConfigDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<ConfigDocument> for Value {
    fn from(document: ConfigDocument) -> Self {
        Self::Object(document.0)
    }
}

impl FromIterator<(String, Value)> for ConfigDocument {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::ConfigDocument;

    fn doc(value: Value) -> ConfigDocument {
        ConfigDocument::try_from(value).expect("object literal")
    }

    #[rstest]
    #[case(json!([1, 2]), "an array")]
    #[case(json!("text"), "a string")]
    #[case(json!(null), "null")]
    fn rejects_non_object_values(#[case] value: Value, #[case] kind: &str) {
        let err = ConfigDocument::try_from(value).expect_err("non-object");
        assert_eq!(
            err.to_string(),
            format!("expected a JSON object at the top level, found {kind}")
        );
    }

    #[test]
    fn canonical_output_is_sorted_and_newline_terminated() {
        let document = doc(json!({"b": {"z": 1, "a": [{"y": 1, "x": 2}]}, "a": true}));
        let rendered = document.to_canonical_json().expect("serialise");
        assert_eq!(
            rendered,
            "{\n  \"a\": true,\n  \"b\": {\n    \"a\": [\n      {\n        \"x\": 2,\n        \"y\": 1\n      }\n    ],\n    \"z\": 1\n  }\n}\n"
        );
    }

    #[test]
    fn canonical_output_ignores_insertion_order() {
        let mut first = ConfigDocument::new();
        first.insert("Security", json!({"Hsts": true}));
        first.insert("Auth", json!({"Authority": "https://issuer"}));
        let mut second = ConfigDocument::new();
        second.insert("Auth", json!({"Authority": "https://issuer"}));
        second.insert("Security", json!({"Hsts": true}));
        assert_eq!(
            first.to_canonical_json().expect("first"),
            second.to_canonical_json().expect("second")
        );
    }

    #[rstest]
    #[case("/Auth/Authority", Some(json!("https://issuer")))]
    #[case("/Auth", Some(json!({"Authority": "https://issuer"})))]
    #[case("/a~1b", Some(json!(1)))]
    #[case("/Missing", None)]
    #[case("Auth", None)]
    fn resolves_pointers(#[case] pointer: &str, #[case] expected: Option<Value>) {
        let document = doc(json!({"Auth": {"Authority": "https://issuer"}, "a/b": 1}));
        assert_eq!(document.pointer(pointer), expected.as_ref());
    }
}
