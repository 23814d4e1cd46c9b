//! Indexer configuration.
//!
//! The YAML file names the document types to index, the enabled modules and
//! the per-module settings. It is fully validated before any network
//! traffic happens.

mod dependencies;

pub use dependencies::Dependencies;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::IndexingError;
use annotation_indexer_pipeline::{AssemblerSettings, DatePaths, DocumentDefinition, ViewDefinition};
use annotation_indexer_shared::{Constraint, Module, ModuleSet, Query};

/// Path the `topTier` shorthand constrains.
const TOP_TIER_PATH: &str = "body.type";

/// Root of the YAML configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IndexerConfig {
    /// Enabled modules; all of them when absent.
    #[serde(default)]
    pub modules: Option<Vec<Module>>,
    #[serde(default)]
    pub id_path: Option<String>,
    #[serde(default)]
    pub anchor_type: Option<String>,
    #[serde(default)]
    pub text_type: Option<String>,
    #[serde(default)]
    pub title_path: Option<String>,
    #[serde(default)]
    pub dates: Option<DatesConfig>,
    #[serde(default)]
    pub documents: Vec<DocumentConfig>,
    /// Shorthand for a document type selected by `body.type`.
    #[serde(default)]
    pub top_tier: Option<String>,
    /// Output field name to dotted source path.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub views: Vec<ViewConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DatesConfig {
    pub actual: Option<String>,
    pub not_before: Option<String>,
    pub not_after: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub constraints: Vec<ConstraintConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    pub name: String,
    #[serde(default)]
    pub constraints: Vec<ConstraintConfig>,
}

/// `{path, value}` for a literal or `{path, values}` for set membership.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstraintConfig {
    pub path: String,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub values: Option<Vec<Value>>,
}

impl ConstraintConfig {
    fn to_constraint(&self) -> Result<(String, Constraint), IndexingError> {
        let constraint = match (&self.value, &self.values) {
            (Some(value), None) => Constraint::Equals(value.clone()),
            (None, Some(values)) => Constraint::IsIn(values.clone()),
            (Some(_), Some(_)) => {
                return Err(IndexingError::config(format!(
                    "Constraint on {} has both value and values",
                    self.path
                )))
            }
            (None, None) => {
                return Err(IndexingError::config(format!(
                    "Constraint on {} has neither value nor values",
                    self.path
                )))
            }
        };
        Ok((self.path.clone(), constraint))
    }
}

fn constraints(configs: &[ConstraintConfig]) -> Result<Vec<(String, Constraint)>, IndexingError> {
    configs.iter().map(ConstraintConfig::to_constraint).collect()
}

impl IndexerConfig {
    /// Read and parse the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, IndexingError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            IndexingError::config(format!("Cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&contents)
            .map_err(|e| IndexingError::config(format!("{}: {e}", path.display())))
    }

    /// Parse a configuration document.
    pub fn from_yaml(contents: &str) -> Result<Self, IndexingError> {
        serde_yaml::from_str(contents).map_err(|e| IndexingError::config(e.to_string()))
    }

    /// The top-tier document definitions, `documents` first, then the
    /// `topTier` shorthand.
    pub fn document_definitions(&self) -> Result<Vec<DocumentDefinition>, IndexingError> {
        let mut definitions = self
            .documents
            .iter()
            .map(|document| {
                Ok(DocumentDefinition::new(
                    &document.doc_type,
                    Query::new().extend(constraints(&document.constraints)?),
                ))
            })
            .collect::<Result<Vec<_>, IndexingError>>()?;

        if let Some(top_tier) = &self.top_tier {
            definitions.push(DocumentDefinition::new(
                top_tier,
                Query::new().equals(TOP_TIER_PATH, top_tier.as_str()),
            ));
        }

        if definitions.is_empty() {
            return Err(IndexingError::config(
                "No document definitions: set `documents` or `topTier`",
            ));
        }
        if let Some(unconstrained) = definitions.iter().find(|d| d.query.is_empty()) {
            return Err(IndexingError::config(format!(
                "Document type {} has no constraints",
                unconstrained.doc_type
            )));
        }

        Ok(definitions)
    }

    /// Settings of the document assembler, defaults filled in.
    pub fn assembler_settings(&self) -> Result<AssemblerSettings, IndexingError> {
        let defaults = AssemblerSettings::default();

        let modules = match &self.modules {
            Some(modules) => modules.iter().copied().collect::<ModuleSet>(),
            None => ModuleSet::all(),
        };

        let dates = match &self.dates {
            Some(dates) => DatePaths {
                actual: dates.actual.clone().unwrap_or(defaults.dates.actual),
                not_before: dates.not_before.clone().unwrap_or(defaults.dates.not_before),
                not_after: dates.not_after.clone().unwrap_or(defaults.dates.not_after),
            },
            None => defaults.dates,
        };

        let views = self
            .views
            .iter()
            .map(|view| {
                Ok(ViewDefinition {
                    name: view.name.clone(),
                    constraints: constraints(&view.constraints)?,
                })
            })
            .collect::<Result<Vec<_>, IndexingError>>()?;

        Ok(AssemblerSettings {
            modules,
            id_path: self.id_path.clone().unwrap_or(defaults.id_path),
            anchor_type: self.anchor_type.clone().unwrap_or(defaults.anchor_type),
            text_type: self.text_type.clone().unwrap_or(defaults.text_type),
            title_path: self.title_path.clone().unwrap_or(defaults.title_path),
            dates,
            fields: self.fields.clone(),
            views,
        })
    }
}
