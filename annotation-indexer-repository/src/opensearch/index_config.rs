//! Default index settings and mappings.
//!
//! Used when the caller does not supply its own mapping file.

use serde_json::{json, Value};

/// Get the default settings and mappings for an annotation document index.
///
/// The configuration includes:
/// - **keyword** fields for the document type and persons, for faceting
/// - **date_range** for the `date` facet, so partial dates like `1610` work
/// - dynamic templates giving per-language `title*` / `artworks*` fields and
///   `*Text` view fields sensible types
pub fn default_index_mapping() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "dynamic_templates": [
                {
                    "artworks": {
                        "match": "artworks*",
                        "mapping": { "type": "keyword" }
                    }
                },
                {
                    "titles": {
                        "match": "title*",
                        "mapping": {
                            "type": "text",
                            "fields": { "keyword": { "type": "keyword" } }
                        }
                    }
                },
                {
                    "views": {
                        "match": "*Text",
                        "mapping": { "type": "text" }
                    }
                }
            ],
            "properties": {
                "type": {
                    "type": "keyword"
                },
                "date": {
                    "type": "date_range",
                    "format": "yyyy-MM-dd||yyyy-MM||yyyy"
                },
                "persons": {
                    "type": "keyword"
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_mapping_structure() {
        let mapping = default_index_mapping();

        assert!(mapping["settings"]["number_of_shards"].is_number());
        assert_eq!(mapping["mappings"]["properties"]["type"]["type"], "keyword");
        assert_eq!(mapping["mappings"]["properties"]["persons"]["type"], "keyword");
        assert_eq!(mapping["mappings"]["properties"]["date"]["type"], "date_range");
        assert_eq!(
            mapping["mappings"]["dynamic_templates"].as_array().map(Vec::len),
            Some(3)
        );
    }
}
