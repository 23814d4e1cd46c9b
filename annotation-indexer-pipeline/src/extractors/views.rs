//! Raw text of view records.

use std::sync::Arc;

use tracing::{trace, warn};

use annotation_indexer_repository::{AnnotationStore, StoreError, TextSource};
use annotation_indexer_shared::{Query, Record};

use crate::cursor::PagedResultCursor;

/// Fetch the text behind the record's first `text_type` target without a
/// selector. Missing targets and failed fetches are logged and yield `None`.
pub async fn fetch_target_text(
    texts: &Arc<dyn TextSource>,
    record: &Record,
    text_type: &str,
) -> Option<String> {
    let anno_id = record.path_str("body.id");

    let Some(source) = record
        .first_target_without_selector(text_type)
        .and_then(|target| target.source())
    else {
        warn!(anno_id = ?anno_id, text_type = %text_type, "No text target without selector");
        return None;
    };

    match texts.fetch_text(source).await {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(anno_id = ?anno_id, source = %source, error = %e, "Failed to fetch text");
            None
        }
    }
}

/// Texts of all records matching `query`, in store order. Records whose
/// text cannot be fetched are skipped.
pub async fn extract_view_texts(
    store: &Arc<dyn AnnotationStore>,
    texts: &Arc<dyn TextSource>,
    query: &Query,
    text_type: &str,
) -> Result<Vec<String>, StoreError> {
    trace!(query = %query.to_value(), "Searching view records");

    let mut cursor = PagedResultCursor::open(store.clone(), query).await?;
    let mut collected = Vec::new();

    while let Some(record) = cursor.next().await? {
        if let Some(text) = fetch_target_text(texts, &record, text_type).await {
            collected.push(text);
        }
    }

    Ok(collected)
}
