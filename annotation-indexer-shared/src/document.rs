//! Search index document types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A date interval as indexed into a `date_range` field.
///
/// Either bound may be absent; absent bounds are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<String>,
}

impl DateRange {
    /// Lower bound of the placeholder range used for undated records.
    pub const PLACEHOLDER_GTE: &'static str = "0001";
    /// Upper bound of the placeholder range used for undated records.
    pub const PLACEHOLDER_LTE: &'static str = "9999";

    /// A range covering exactly one date.
    pub fn exact(date: impl Into<String>) -> Self {
        let date = date.into();
        Self {
            gte: Some(date.clone()),
            lte: Some(date),
        }
    }

    /// A range built from optional bounds.
    pub fn between(gte: Option<String>, lte: Option<String>) -> Self {
        Self { gte, lte }
    }

    /// The full-range placeholder substituted for records without any date.
    pub fn placeholder() -> Self {
        Self {
            gte: Some(Self::PLACEHOLDER_GTE.to_string()),
            lte: Some(Self::PLACEHOLDER_LTE.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.gte.is_none() && self.lte.is_none()
    }

    /// The range as a JSON object with only the present bounds.
    pub fn to_value(&self) -> Value {
        let mut range = Map::new();
        if let Some(gte) = &self.gte {
            range.insert("gte".to_string(), Value::from(gte.as_str()));
        }
        if let Some(lte) = &self.lte {
            range.insert("lte".to_string(), Value::from(lte.as_str()));
        }
        Value::Object(range)
    }
}

impl From<DateRange> for Value {
    fn from(range: DateRange) -> Self {
        range.to_value()
    }
}

/// One document destined for the search index.
///
/// Fields are only present when a module produced a value for them; inserting
/// JSON `null` is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: String,
    fields: Map<String, Value>,
}

impl Document {
    /// Create an empty document keyed by `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// The stable document id the document is written under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Set a field, overwriting any previous value. `null` values are dropped.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let value = value.into();
        if !value.is_null() {
            self.fields.insert(key.into(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The JSON body sent to the index.
    pub fn to_body(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exact_range() {
        let range = DateRange::exact("1610-05-02");
        assert_eq!(
            serde_json::to_value(&range).unwrap(),
            json!({ "gte": "1610-05-02", "lte": "1610-05-02" })
        );
    }

    #[test]
    fn test_open_range_omits_missing_bound() {
        let range = DateRange::between(Some("1610".to_string()), None);
        assert_eq!(serde_json::to_value(&range).unwrap(), json!({ "gte": "1610" }));
    }

    #[test]
    fn test_null_fields_are_dropped() {
        let mut doc = Document::new("letter-42");
        doc.insert("sender", Value::Null);
        doc.insert("type", "letter");

        assert_eq!(doc.id(), "letter-42");
        assert!(!doc.contains_key("sender"));
        assert_eq!(doc.to_body(), json!({ "type": "letter" }));
    }
}
