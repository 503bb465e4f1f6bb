//! Deep merge of configuration documents.
//!
//! Merge semantics, applied key by key:
//! - Objects: merged recursively (union of keys, incoming wins on conflict)
//! - Arrays: REPLACE (no concatenation)
//! - Scalars and `null`: override
//!
//! An incoming object replaces an accumulated non-object wholesale.
//!
//! Folding is incremental: `merge(merge(a, b), c)` equals `merge(a, b, c)`,
//! so callers may merge documents one at a time.

use serde_json::{Map, Value, map::Entry};

use crate::ConfigDocument;

/// Overlay `incoming` onto `target`, updating `target` in place.
///
/// # Examples
///
/// ```rust
/// use fragment_config::merge_value;
/// use serde_json::json;
///
/// let mut acc = json!({"a": 1, "b": {"x": 1}});
/// merge_value(&mut acc, json!({"b": {"y": 2}, "c": 3}));
/// assert_eq!(acc, json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3}));
///
/// // Arrays replace existing values.
/// merge_value(&mut acc, json!({"b": [1, 2, 3]}));
/// assert_eq!(acc["b"], json!([1, 2, 3]));
/// ```
pub fn merge_value(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(map)) => merge_maps(existing, map),
        (slot, replacement) => *slot = replacement,
    }
}

/// Merge the entries of `incoming` into `target`.
pub(crate) fn merge_maps(target: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (key, value) in incoming {
        match target.entry(key) {
            Entry::Occupied(mut slot) => merge_value(slot.get_mut(), value),
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
        }
    }
}

/// Fold `documents` in order, earliest lowest precedence.
///
/// An empty sequence yields an empty document and a single document is
/// returned unchanged.
///
/// ```rust
/// use fragment_config::{ConfigDocument, merge_documents};
/// use serde_json::json;
///
/// let a = ConfigDocument::try_from(json!({"x": {"p": 1}, "list": [1, 2]}))?;
/// let b = ConfigDocument::try_from(json!({"x": {"q": 2}, "list": [3]}))?;
/// let merged = merge_documents([a, b]);
/// assert_eq!(
///     serde_json::Value::from(merged),
///     json!({"x": {"p": 1, "q": 2}, "list": [3]})
/// );
/// # Ok::<_, fragment_config::NonObjectDocument>(())
/// ```
pub fn merge_documents<I>(documents: I) -> ConfigDocument
where
    I: IntoIterator<Item = ConfigDocument>,
{
    documents
        .into_iter()
        .fold(ConfigDocument::new(), |mut merged, document| {
            merged.merge_from(document);
            merged
        })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::{merge_documents, merge_value};
    use crate::ConfigDocument;

    fn doc(value: Value) -> ConfigDocument {
        ConfigDocument::try_from(value).expect("object literal")
    }

    #[test]
    fn empty_sequence_yields_empty_document() {
        assert_eq!(merge_documents([]), ConfigDocument::new());
    }

    #[test]
    fn single_document_is_returned_unchanged() {
        let document = doc(json!({
            "Logging": {"LogLevel": {"Default": "Information"}},
            "AllowedHosts": "*",
            "Origins": ["https://a", "https://b"],
            "Empty": {},
            "Nothing": null
        }));
        assert_eq!(merge_documents([document.clone()]), document);
    }

    #[rstest]
    #[case(json!(1), json!(2))]
    #[case(json!("prod"), json!("dev"))]
    #[case(json!(true), json!(false))]
    #[case(json!({"nested": 1}), json!("flat"))]
    #[case(json!(5), json!(null))]
    #[case(json!([1, 2]), json!([3]))]
    #[case(json!("scalar"), json!({"now": "object"}))]
    fn later_value_wins_unless_both_are_objects(#[case] first: Value, #[case] second: Value) {
        let merged = merge_documents([doc(json!({"k": first})), doc(json!({"k": second.clone()}))]);
        assert_eq!(merged.get("k"), Some(&second));
    }

    #[test]
    fn nested_objects_union_recursively() {
        let merged = merge_documents([
            doc(json!({"x": {"p": 1}})),
            doc(json!({"x": {"q": 2}})),
        ]);
        assert_eq!(Value::from(merged), json!({"x": {"p": 1, "q": 2}}));
    }

    #[test]
    fn arrays_are_replaced_not_appended() {
        let merged = merge_documents([doc(json!({"list": [1, 2]})), doc(json!({"list": [3]}))]);
        assert_eq!(Value::from(merged), json!({"list": [3]}));
    }

    #[test]
    fn deep_conflicts_resolve_at_the_leaf() {
        let merged = merge_documents([
            doc(json!({"level1": {"level2": {"a": 1, "b": 2}}})),
            doc(json!({"level1": {"level2": {"b": 3, "c": 4}}})),
        ]);
        assert_eq!(
            Value::from(merged),
            json!({"level1": {"level2": {"a": 1, "b": 3, "c": 4}}})
        );
    }

    #[test]
    fn incremental_folding_matches_single_fold() {
        let a = doc(json!({"x": {"p": 1}, "s": 1, "arr": [1]}));
        let b = doc(json!({"x": 5, "s": {"deep": true}}));
        let c = doc(json!({"x": {"q": 2}, "arr": [2, 3]}));

        let stepwise = merge_documents([merge_documents([a.clone(), b.clone()]), c.clone()]);
        let single = merge_documents([a, b, c]);

        assert_eq!(stepwise, single);
        assert_eq!(
            Value::from(single),
            json!({"x": {"q": 2}, "s": {"deep": true}, "arr": [2, 3]})
        );
    }

    #[test]
    fn grouping_is_irrelevant_for_object_valued_layers() {
        let a = doc(json!({"Auth": {"Authority": "a", "Audience": "api"}}));
        let b = doc(json!({"Auth": {"Authority": "b"}, "Http": {"Timeout": 10}}));
        let c = doc(json!({"Http": {"Retries": 3}}));

        let left = merge_documents([merge_documents([a.clone(), b.clone()]), c.clone()]);
        let right = merge_documents([a, merge_documents([b, c])]);

        assert_eq!(left, right);
    }

    #[test]
    fn merge_value_replaces_non_object_target() {
        let mut target = json!([1, 2, 3]);
        merge_value(&mut target, json!({"a": 1}));
        assert_eq!(target, json!({"a": 1}));
    }
}
