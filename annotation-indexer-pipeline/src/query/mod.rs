//! Derived queries over a record's text anchor.

use serde_json::Value;

use annotation_indexer_shared::{Anchor, Constraint, Query};

/// Body type of entity reference annotations.
pub const ENTITY_BODY_TYPE: &str = "tei:Rs";

/// Field holding the entity category of a reference annotation.
pub const ENTITY_CATEGORY_PATH: &str = "body.metadata.tei:type";

/// Builds queries for records that overlap one anchor range.
///
/// The base query is never mutated; every derived query starts from a copy.
#[derive(Debug, Clone)]
pub struct OverlapQueryBuilder {
    base: Query,
}

impl OverlapQueryBuilder {
    pub fn new(anchor: Anchor) -> Self {
        Self {
            base: Query::overlapping(anchor),
        }
    }

    /// Records overlapping the anchor, without further constraints.
    pub fn base(&self) -> Query {
        self.base.clone()
    }

    /// The base query merged with `constraints`; later entries overwrite
    /// earlier ones on the same path.
    pub fn with_constraints<I, P>(&self, constraints: I) -> Query
    where
        I: IntoIterator<Item = (P, Constraint)>,
        P: Into<String>,
    {
        self.base().extend(constraints)
    }

    /// Entity reference annotations of `category` (`person`, `artwork`, ...)
    /// overlapping the anchor.
    pub fn entities(&self, category: &str) -> Query {
        self.base()
            .equals("body.type", ENTITY_BODY_TYPE)
            .equals(ENTITY_CATEGORY_PATH, Value::from(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn builder() -> OverlapQueryBuilder {
        OverlapQueryBuilder::new(Anchor::new("T1", 10, 20))
    }

    #[test]
    fn test_entity_query() {
        assert_eq!(
            builder().entities("person").to_value(),
            json!({
                ":overlapsWithTextAnchorRange": { "source": "T1", "start": 10, "end": 20 },
                "body.type": "tei:Rs",
                "body.metadata.tei:type": "person"
            })
        );
    }

    #[test]
    fn test_derived_queries_leave_base_untouched() {
        let builder = builder();
        let _ = builder.with_constraints([(
            "body.type",
            Constraint::IsIn(vec![json!("tei:Div"), json!("tei:P")]),
        )]);
        let _ = builder.entities("artwork");

        assert_eq!(builder.base().len(), 1);
        assert_eq!(builder.base(), Query::overlapping(Anchor::new("T1", 10, 20)));
    }

    #[test]
    fn test_with_constraints() {
        let query = builder().with_constraints(vec![
            ("body.type".to_string(), Constraint::Equals(json!("tei:Div"))),
            ("body.metadata.lang".to_string(), Constraint::Equals(json!("en"))),
            ("body.type".to_string(), Constraint::Equals(json!("tei:Note"))),
        ]);

        assert_eq!(query.len(), 3);
        assert_eq!(
            query.get("body.type"),
            Some(&Constraint::Equals(json!("tei:Note")))
        );
    }
}
