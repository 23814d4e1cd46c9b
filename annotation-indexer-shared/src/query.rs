//! Annotation store query model.
//!
//! A [`Query`] maps field paths to constraints. Queries are built by
//! consuming and extending a base query, so a query that has already been
//! submitted is never changed in place; callers `clone()` a base and extend
//! the copy instead.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::record::Anchor;

/// Query key of the overlap-range constraint.
pub const OVERLAP_KEY: &str = ":overlapsWithTextAnchorRange";

/// Operator key of a set-membership constraint.
pub const IS_IN_KEY: &str = ":isIn";

/// A single constraint on a field path.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// The field equals a literal value.
    Equals(Value),
    /// The field equals one of the listed values.
    IsIn(Vec<Value>),
    /// The record's text anchor overlaps the given range.
    Overlaps(Anchor),
}

impl Constraint {
    /// The store's JSON form of this constraint.
    pub fn to_value(&self) -> Value {
        match self {
            Constraint::Equals(value) => value.clone(),
            Constraint::IsIn(values) => json!({ IS_IN_KEY: values }),
            Constraint::Overlaps(anchor) => json!({
                "source": anchor.source,
                "start": anchor.start,
                "end": anchor.end,
            }),
        }
    }
}

/// Field path to constraint mapping submitted to the annotation store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    constraints: BTreeMap<String, Constraint>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// A query selecting records whose anchor overlaps `anchor`.
    pub fn overlapping(anchor: Anchor) -> Self {
        Self::new().with(OVERLAP_KEY, Constraint::Overlaps(anchor))
    }

    /// Add a constraint, replacing any earlier constraint on the same path.
    pub fn with(mut self, path: impl Into<String>, constraint: Constraint) -> Self {
        self.constraints.insert(path.into(), constraint);
        self
    }

    /// Add an equality constraint.
    pub fn equals(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(path, Constraint::Equals(value.into()))
    }

    /// Add a set-membership constraint.
    pub fn is_in(self, path: impl Into<String>, values: Vec<Value>) -> Self {
        self.with(path, Constraint::IsIn(values))
    }

    /// Merge constraints in order; later entries overwrite earlier ones.
    pub fn extend<I, P>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = (P, Constraint)>,
        P: Into<String>,
    {
        for (path, constraint) in constraints {
            self.constraints.insert(path.into(), constraint);
        }
        self
    }

    pub fn get(&self, path: &str) -> Option<&Constraint> {
        self.constraints.get(path)
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// The JSON body submitted to the store.
    pub fn to_value(&self) -> Value {
        let body: Map<String, Value> = self
            .constraints
            .iter()
            .map(|(path, constraint)| (path.clone(), constraint.to_value()))
            .collect();
        Value::Object(body)
    }
}
