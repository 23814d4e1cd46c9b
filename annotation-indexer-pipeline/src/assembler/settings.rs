//! Assembly settings.

use std::collections::BTreeMap;

use annotation_indexer_shared::{Constraint, ModuleSet};

/// Dotted paths of the date values of a top-tier record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePaths {
    pub actual: String,
    pub not_before: String,
    pub not_after: String,
}

impl Default for DatePaths {
    fn default() -> Self {
        Self {
            actual: "body.metadata.dateSent".to_string(),
            not_before: "body.metadata.dateSentNotBefore".to_string(),
            not_after: "body.metadata.dateSentNotAfter".to_string(),
        }
    }
}

/// A named text view of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDefinition {
    pub name: String,
    /// Constraints selecting the overlapping records whose texts make up the
    /// view. Without constraints the view is the top-tier record's own text.
    pub constraints: Vec<(String, Constraint)>,
}

impl ViewDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, path: impl Into<String>, constraint: Constraint) -> Self {
        self.constraints.push((path.into(), constraint));
        self
    }

    pub fn is_constrained(&self) -> bool {
        !self.constraints.is_empty()
    }

    /// The document field the view is written to.
    pub fn field_name(&self) -> String {
        format!("{}Text", self.name)
    }
}

/// Configuration of a [`DocumentAssembler`](super::DocumentAssembler).
#[derive(Debug, Clone)]
pub struct AssemblerSettings {
    /// Enabled modules.
    pub modules: ModuleSet,
    /// Dotted path of the record identifier.
    pub id_path: String,
    /// Target type carrying the record's primary selector.
    pub anchor_type: String,
    /// Target type of raw-text targets.
    pub text_type: String,
    /// Dotted path of the language-keyed title mapping.
    pub title_path: String,
    pub dates: DatePaths,
    /// Output field name to dotted source path.
    pub fields: BTreeMap<String, String>,
    pub views: Vec<ViewDefinition>,
}

impl Default for AssemblerSettings {
    fn default() -> Self {
        Self {
            modules: ModuleSet::all(),
            id_path: "body.id".to_string(),
            anchor_type: "Text".to_string(),
            text_type: "LogicalText".to_string(),
            title_path: "body.metadata.title".to_string(),
            dates: DatePaths::default(),
            fields: BTreeMap::new(),
            views: Vec::new(),
        }
    }
}
