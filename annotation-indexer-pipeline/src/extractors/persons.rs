//! Person facet.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, trace, warn};

use annotation_indexer_repository::{AnnotationStore, StoreError};

use super::{references, REFERENCE_PATH};
use crate::cursor::PagedResultCursor;
use crate::query::OverlapQueryBuilder;

/// Entity category of person references.
pub const PERSON_CATEGORY: &str = "person";

/// Names of the persons referenced by records overlapping the anchor, sorted
/// and without duplicates.
pub async fn extract_persons(
    store: &Arc<dyn AnnotationStore>,
    overlap: &OverlapQueryBuilder,
) -> Result<Vec<String>, StoreError> {
    let query = overlap.entities(PERSON_CATEGORY);
    trace!(query = %query.to_value(), "Searching person references");

    let mut cursor = PagedResultCursor::open(store.clone(), &query).await?;
    let mut names = BTreeSet::new();

    while let Some(record) = cursor.next().await? {
        let anno_id = record.path_str("body.id");
        let refs = references(record.path(REFERENCE_PATH));
        if refs.is_empty() {
            warn!(anno_id = ?anno_id, "Person annotation without references");
        }
        names.extend(refs.into_iter().map(|r| resolve_person_name(r, anno_id)));
    }

    Ok(names.into_iter().collect())
}

/// The name of one person reference: its `sortLabel`, else its
/// `displayLabel`, else an `unknown: <ref>` placeholder.
pub fn resolve_person_name(reference: &Value, anno_id: Option<&str>) -> String {
    if let Some(name) = label(reference, "sortLabel") {
        return name.to_string();
    }

    if let Some(name) = label(reference, "displayLabel") {
        debug!(anno_id = ?anno_id, name = %name, "Person reference without sortLabel, using displayLabel");
        return name.to_string();
    }

    let raw = match reference {
        Value::String(raw) => raw.clone(),
        _ => match reference.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => reference.to_string(),
        },
    };
    error!(anno_id = ?anno_id, reference = %raw, "Person reference without any label");
    format!("unknown: {raw}")
}

fn label<'a>(reference: &'a Value, key: &str) -> Option<&'a str> {
    reference
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{page, MockSession, MockStore};
    use annotation_indexer_shared::Anchor;
    use serde_json::json;

    #[test]
    fn test_sort_label_preferred() {
        let reference = json!({ "sortLabel": "Doe, J.", "displayLabel": "J. Doe" });
        assert_eq!(resolve_person_name(&reference, None), "Doe, J.");
    }

    #[test]
    fn test_display_label_fallback() {
        let reference = json!({ "sortLabel": " ", "displayLabel": "J. Doe" });
        assert_eq!(resolve_person_name(&reference, Some("anno-1")), "J. Doe");
    }

    #[test]
    fn test_unknown_placeholder() {
        let reference = json!({ "id": "bio:p123" });
        assert_eq!(resolve_person_name(&reference, None), "unknown: bio:p123");

        let reference = json!({ "role": "sender" });
        assert_eq!(
            resolve_person_name(&reference, None),
            r#"unknown: {"role":"sender"}"#
        );

        assert_eq!(resolve_person_name(&json!("bio:p7"), None), "unknown: bio:p7");
    }

    #[tokio::test]
    async fn test_bare_string_references() {
        let overlap = OverlapQueryBuilder::new(Anchor::new("T1", 0, 100));
        let store: Arc<dyn AnnotationStore> = Arc::new(MockStore::new().route(
            &overlap.entities("person"),
            MockSession::new().page(
                "0",
                page(
                    vec![
                        json!({ "body": { "id": "p1", "metadata": { "ref": "bio:p1" } } }),
                        json!({ "body": { "id": "p2", "metadata": { "ref": ["bio:p2", { "sortLabel": "Alice" }] } } }),
                    ],
                    None,
                ),
            ),
        ));

        let persons = extract_persons(&store, &overlap).await.unwrap();

        assert_eq!(persons, vec!["Alice", "unknown: bio:p1", "unknown: bio:p2"]);
    }

    #[tokio::test]
    async fn test_persons_sorted_and_deduplicated() {
        let overlap = OverlapQueryBuilder::new(Anchor::new("T1", 0, 100));
        let store: Arc<dyn AnnotationStore> = Arc::new(MockStore::new().route(
            &overlap.entities("person"),
            MockSession::new().page(
                "0",
                page(
                    vec![
                        json!({ "body": { "id": "p1", "metadata": { "ref": [
                            { "sortLabel": "Zwaan, A." },
                            { "sortLabel": "Alice" }
                        ] } } }),
                        json!({ "body": { "id": "p2", "metadata": {
                            "ref": { "displayLabel": "Alice" }
                        } } }),
                        json!({ "body": { "id": "p3", "metadata": {} } }),
                    ],
                    None,
                ),
            ),
        ));

        let persons = extract_persons(&store, &overlap).await.unwrap();

        assert_eq!(persons, vec!["Alice", "Zwaan, A."]);
    }
}
