//! Facet extractors.
//!
//! Each extractor reads from the annotation store only; none of them writes
//! anything or keeps state between records.

mod artworks;
mod date;
mod persons;
mod views;

use serde_json::Value;

pub use artworks::extract_artworks;
pub use date::{contrive_date, DateFields};
pub use persons::{extract_persons, resolve_person_name};
pub use views::{extract_view_texts, fetch_target_text};

/// Version of the reference layout the person and artwork extractors read:
/// references at `body.metadata.ref`, persons labelled by `sortLabel` or
/// `displayLabel`, artworks carrying a language to heading map in `head`.
pub const REFERENCE_SCHEMA_VERSION: u32 = 2;

/// Dotted path of the entity references on an overlap record.
pub const REFERENCE_PATH: &str = "body.metadata.ref";

/// The field name for a language-keyed value, e.g. `artworks` + `en` gives
/// `artworksEN`.
pub fn language_key(prefix: &str, lang: &str) -> String {
    format!("{prefix}{}", lang.to_uppercase())
}

/// The references of an overlap record. A single reference, object or bare
/// string, is treated as a one-element list.
fn references(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().filter(|item| !item.is_null()).collect(),
        Some(single @ (Value::Object(_) | Value::String(_))) => vec![single],
        _ => Vec::new(),
    }
}

/// A scalar as text; numbers are accepted for year-only dates.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
