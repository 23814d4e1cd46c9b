//! Artwork facet.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde_json::Value;
use tracing::{trace, warn};

use annotation_indexer_repository::{AnnotationStore, StoreError};

use super::{references, REFERENCE_PATH};
use crate::cursor::PagedResultCursor;
use crate::query::OverlapQueryBuilder;

/// Entity category of artwork references.
pub const ARTWORK_CATEGORY: &str = "artwork";

/// Headings of the artworks referenced by records overlapping the anchor,
/// grouped by language. Each language's headings are sorted and distinct.
pub async fn extract_artworks(
    store: &Arc<dyn AnnotationStore>,
    overlap: &OverlapQueryBuilder,
) -> Result<BTreeMap<String, Vec<String>>, StoreError> {
    let query = overlap.entities(ARTWORK_CATEGORY);
    trace!(query = %query.to_value(), "Searching artwork references");

    let mut cursor = PagedResultCursor::open(store.clone(), &query).await?;
    let mut headings: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    while let Some(record) = cursor.next().await? {
        let anno_id = record.path_str("body.id");

        for reference in references(record.path(REFERENCE_PATH)) {
            let Some(head) = reference.get("head").and_then(Value::as_object) else {
                warn!(anno_id = ?anno_id, "Artwork reference without heading");
                continue;
            };

            for (lang, text) in head {
                match text.as_str().map(str::trim) {
                    Some(text) if !text.is_empty() => {
                        headings
                            .entry(lang.clone())
                            .or_default()
                            .insert(text.to_string());
                    }
                    _ => warn!(anno_id = ?anno_id, lang = %lang, "Empty artwork heading"),
                }
            }
        }
    }

    Ok(headings
        .into_iter()
        .map(|(lang, texts)| (lang, texts.into_iter().collect()))
        .collect())
}
