//! Request and response types for store and index operations.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use annotation_indexer_shared::Record;

/// Handle to one server-side search session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    /// The server-assigned search id.
    pub id: String,
}

impl SearchSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Server-side information about a search session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionInfo {
    /// Total hit count, `None` while the store has not computed it yet.
    pub hits: Option<u64>,
}

impl SessionInfo {
    pub fn new(hits: Option<u64>) -> Self {
        Self { hits }
    }

    /// Read session info from the store's JSON. A missing or negative
    /// `hits` value means the count is still unknown.
    pub fn from_value(value: &Value) -> Self {
        let hits = value
            .get("hits")
            .and_then(Value::as_i64)
            .and_then(|hits| u64::try_from(hits).ok());
        Self { hits }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResultPage {
    /// Records on this page; `None` when the page carried no `items` at all.
    #[serde(default)]
    pub items: Option<Vec<Record>>,
    /// Continuation link to the following page.
    #[serde(default)]
    pub next: Option<String>,
}

impl ResultPage {
    pub fn new(items: Vec<Record>, next: Option<String>) -> Self {
        Self {
            items: Some(items),
            next,
        }
    }

    /// Number of records on the page.
    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the page carries a continuation link.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// The `page` parameter of the continuation link.
    ///
    /// The token is opaque; it is not assumed to be the current page plus one.
    pub fn next_page(&self) -> Option<String> {
        self.next.as_deref().and_then(page_token)
    }

    /// Take the page's records, leaving the page empty.
    pub fn take_items(&mut self) -> Vec<Record> {
        self.items.take().unwrap_or_default()
    }
}

/// Extract the `page` query parameter from a continuation link, which may be
/// absolute or relative.
fn page_token(link: &str) -> Option<String> {
    let url = Url::parse(link)
        .or_else(|_| Url::parse("http://localhost/").and_then(|base| base.join(link)))
        .ok()?;

    url.query_pairs()
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned())
}

/// Outcome reported by the search index for a document write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// The document did not exist before.
    Created,
    /// An existing document was replaced.
    Updated,
    /// Anything else the engine reported.
    Other(String),
}

impl WriteResult {
    pub fn parse(result: &str) -> Self {
        match result {
            "created" => Self::Created,
            "updated" => Self::Updated,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Other(other) => other,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created)
    }
}

impl fmt::Display for WriteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_token_from_absolute_link() {
        let page = ResultPage {
            items: Some(vec![]),
            next: Some("https://ar.example/services/c/search/abc?page=3".to_string()),
        };
        assert_eq!(page.next_page(), Some("3".to_string()));
    }

    #[test]
    fn test_page_token_is_opaque() {
        let page = ResultPage {
            items: None,
            next: Some("/services/c/search/abc?size=10&page=Zm9v".to_string()),
        };
        assert_eq!(page.next_page(), Some("Zm9v".to_string()));
    }

    #[test]
    fn test_link_without_page_parameter() {
        let page = ResultPage {
            items: None,
            next: Some("https://ar.example/services/c/search/abc".to_string()),
        };
        assert!(page.has_next());
        assert!(page.next_page().is_none());
    }

    #[test]
    fn test_page_deserialization() {
        let page: ResultPage = serde_json::from_value(json!({
            "type": "AnnotationPage",
            "items": [{ "body": { "id": "a" } }, { "body": { "id": "b" } }],
            "next": "https://ar.example/search/x?page=1"
        }))
        .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page.next_page(), Some("1".to_string()));

        let empty: ResultPage = serde_json::from_value(json!({ "type": "AnnotationPage" })).unwrap();
        assert!(empty.items.is_none());
        assert!(!empty.has_next());
    }

    #[test]
    fn test_session_info_unknown_hits() {
        assert_eq!(SessionInfo::from_value(&json!({ "hits": 12 })).hits, Some(12));
        assert_eq!(SessionInfo::from_value(&json!({ "hits": -1 })).hits, None);
        assert_eq!(SessionInfo::from_value(&json!({})).hits, None);
    }

    #[test]
    fn test_write_result_parse() {
        assert!(WriteResult::parse("created").is_created());
        assert_eq!(WriteResult::parse("updated"), WriteResult::Updated);
        assert_eq!(WriteResult::parse("noop").to_string(), "noop");
    }
}
