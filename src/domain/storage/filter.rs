//! JSON containment matching for query-by-field lookups
//!
//! Mirrors the semantics of PostgreSQL's `jsonb @> jsonb` operator so that
//! the in-memory and PostgreSQL backends answer the same filter identically.

use serde_json::Value;

/// Returns true when `document` contains `filter`.
///
/// - objects: every key of the filter must exist in the document and its
///   value must in turn be contained
/// - arrays: every filter element must be contained by some document element
/// - scalars: plain equality
pub fn json_contains(document: &Value, filter: &Value) -> bool {
    match (document, filter) {
        (Value::Object(doc), Value::Object(wanted)) => wanted.iter().all(|(key, value)| {
            doc.get(key)
                .is_some_and(|candidate| json_contains(candidate, value))
        }),
        (Value::Array(doc), Value::Array(wanted)) => wanted
            .iter()
            .all(|value| doc.iter().any(|candidate| json_contains(candidate, value))),
        // A top-level array contains a bare scalar it holds
        (Value::Array(doc), scalar) if !scalar.is_object() => doc.contains(scalar),
        (doc, wanted) => doc == wanted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_field_match() {
        let doc = json!({"teamName": "Alpha", "intake": "49"});

        assert!(json_contains(&doc, &json!({"teamName": "Alpha"})));
        assert!(!json_contains(&doc, &json!({"teamName": "Beta"})));
        assert!(!json_contains(&doc, &json!({"missing": "x"})));
    }

    #[test]
    fn test_nested_array_element_match() {
        let doc = json!({
            "members": [
                {"educationalMail": "a@cse.bubt.edu.bd", "phone": "1"},
                {"educationalMail": "b@cse.bubt.edu.bd", "phone": "2"}
            ]
        });

        assert!(json_contains(
            &doc,
            &json!({"members": [{"educationalMail": "b@cse.bubt.edu.bd"}]})
        ));
        assert!(!json_contains(
            &doc,
            &json!({"members": [{"educationalMail": "c@cse.bubt.edu.bd"}]})
        ));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(json_contains(&json!({"a": 1}), &json!({})));
    }

    #[test]
    fn test_null_is_matched_literally() {
        let doc = json!({"teacherId": null});

        assert!(json_contains(&doc, &json!({"teacherId": null})));
        assert!(!json_contains(&doc, &json!({"teacherId": "t-1"})));
    }
}
