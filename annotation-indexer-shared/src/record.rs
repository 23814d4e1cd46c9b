//! Read-only access to annotation records.
//!
//! A [`Record`] wraps one annotation exactly as the store returned it. All
//! lookups are infallible: a missing step anywhere along a dotted path simply
//! yields `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One annotation, an immutable JSON tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    /// Wrap a JSON value as a record.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The underlying JSON tree.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Look up the value at a dotted path such as `body.metadata.title`.
    ///
    /// Returns `None` when any segment is missing, when an intermediate value
    /// is not an object, or when the value found is JSON `null`.
    pub fn path(&self, dotted: &str) -> Option<&Value> {
        dotted
            .split('.')
            .try_fold(&self.0, |node, step| node.as_object()?.get(step))
            .filter(|value| !value.is_null())
    }

    /// Look up a string value at a dotted path.
    pub fn path_str(&self, dotted: &str) -> Option<&str> {
        self.path(dotted).and_then(Value::as_str)
    }

    /// All targets of this record. A single target object is treated as a
    /// one-element list.
    pub fn targets(&self) -> impl Iterator<Item = Target<'_>> {
        let targets: &[Value] = match self.0.get("target") {
            Some(Value::Array(items)) => items.as_slice(),
            Some(single @ Value::Object(_)) => std::slice::from_ref(single),
            _ => &[],
        };
        targets.iter().map(Target)
    }

    /// The first target of the given type that carries a selector.
    pub fn first_target_with_selector(&self, kind: &str) -> Option<Target<'_>> {
        self.targets()
            .find(|target| target.kind() == Some(kind) && target.has_selector())
    }

    /// The first target of the given type without a selector, which points at
    /// raw text content.
    pub fn first_target_without_selector(&self, kind: &str) -> Option<Target<'_>> {
        self.targets()
            .find(|target| target.kind() == Some(kind) && !target.has_selector())
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Borrowed view of one entry in a record's `target` list.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a>(&'a Value);

impl<'a> Target<'a> {
    /// The target's `type`, i.e. the text category it points into.
    pub fn kind(&self) -> Option<&'a str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// The target's `source` URI.
    pub fn source(&self) -> Option<&'a str> {
        self.0.get("source").and_then(Value::as_str)
    }

    /// The raw selector value, if any.
    pub fn selector(&self) -> Option<&'a Value> {
        self.0.get("selector").filter(|selector| !selector.is_null())
    }

    pub fn has_selector(&self) -> bool {
        self.selector().is_some()
    }

    /// The anchor range this target selects.
    ///
    /// The selector may be a single object or a list of selectors; the first
    /// one carrying numeric `start` and `end` offsets wins.
    pub fn anchor(&self) -> Option<Anchor> {
        let source = self.source()?;
        let selector = match self.selector()? {
            Value::Array(selectors) => selectors.iter().find(|s| offsets(s).is_some())?,
            selector => selector,
        };
        let (start, end) = offsets(selector)?;

        Some(Anchor {
            source: source.to_string(),
            start,
            end,
        })
    }
}

fn offsets(selector: &Value) -> Option<(u64, u64)> {
    let start = selector.get("start")?.as_u64()?;
    let end = selector.get("end")?.as_u64()?;
    Some((start, end))
}

/// A `(source, start, end)` position inside a text stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub source: String,
    pub start: u64,
    pub end: u64,
}

impl Anchor {
    pub fn new(source: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            source: source.into(),
            start,
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn letter() -> Record {
        Record::new(json!({
            "body": {
                "id": "letter-42",
                "metadata": { "title": { "en": "A letter" }, "empty": null }
            },
            "target": [
                { "type": "LogicalText", "source": "https://text/1" },
                { "type": "Text", "source": "T1", "selector": { "start": 0, "end": 100 } },
                { "type": "Text", "source": "T2", "selector": { "start": 5, "end": 9 } }
            ]
        }))
    }

    #[test]
    fn test_path_lookup() {
        let record = letter();

        assert_eq!(record.path_str("body.id"), Some("letter-42"));
        assert_eq!(record.path("body.metadata.title"), Some(&json!({ "en": "A letter" })));
        assert!(record.path("body.missing.title").is_none());
        assert!(record.path("body.id.deeper").is_none());
        assert!(record.path("body.metadata.empty").is_none());
    }

    #[test]
    fn test_first_target_with_selector() {
        let record = letter();

        let target = record.first_target_with_selector("Text").unwrap();
        assert_eq!(target.anchor(), Some(Anchor::new("T1", 0, 100)));
        assert!(record.first_target_with_selector("LogicalText").is_none());
    }

    #[test]
    fn test_first_target_without_selector() {
        let record = letter();

        let target = record.first_target_without_selector("LogicalText").unwrap();
        assert_eq!(target.source(), Some("https://text/1"));
        assert!(record.first_target_without_selector("Text").is_none());
    }

    #[test]
    fn test_single_target_object_and_selector_list() {
        let record = Record::new(json!({
            "target": {
                "type": "Text",
                "source": "T9",
                "selector": [{ "type": "Other" }, { "start": 3, "end": 4 }]
            }
        }));

        let target = record.first_target_with_selector("Text").unwrap();
        assert_eq!(target.anchor(), Some(Anchor::new("T9", 3, 4)));
    }

    #[test]
    fn test_record_without_targets() {
        let record = Record::new(json!({ "body": {} }));
        assert_eq!(record.targets().count(), 0);
        assert!(record.first_target_with_selector("Text").is_none());
    }
}
