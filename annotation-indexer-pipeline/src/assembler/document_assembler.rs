//! Document assembler implementation.
//!
//! Turns one top-tier record into one search document, running the enabled
//! modules in turn.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

use annotation_indexer_repository::{AnnotationStore, TextSource};
use annotation_indexer_shared::{DateRange, Document, Module, Record};

use super::settings::{AssemblerSettings, ViewDefinition};
use crate::errors::PipelineError;
use crate::extractors::{
    contrive_date, extract_artworks, extract_persons, extract_view_texts, fetch_target_text,
    language_key, scalar_text, DateFields,
};
use crate::query::OverlapQueryBuilder;

/// Assembler that transforms top-tier records into search documents.
///
/// Overlap-based modules (artworks, persons, constrained views) query the
/// annotation store around the record's primary anchor; views fetch raw text
/// from the text source.
pub struct DocumentAssembler {
    store: Arc<dyn AnnotationStore>,
    texts: Arc<dyn TextSource>,
    settings: AssemblerSettings,
}

impl DocumentAssembler {
    pub fn new(
        store: Arc<dyn AnnotationStore>,
        texts: Arc<dyn TextSource>,
        settings: AssemblerSettings,
    ) -> Self {
        Self {
            store,
            texts,
            settings,
        }
    }

    /// Assemble the document of type `doc_type` for `record`.
    ///
    /// # Errors
    ///
    /// * `PipelineError::MissingIdentifier` - If the record has no identifier
    /// * `PipelineError::MissingAnchor` - If an overlap module is enabled and
    ///   the record has no anchor target
    /// * `PipelineError::StoreError` - If an overlap search fails
    #[instrument(skip(self, record), fields(doc_id))]
    pub async fn assemble(&self, doc_type: &str, record: &Record) -> Result<Document, PipelineError> {
        let doc_id = self.identifier(record)?;
        tracing::Span::current().record("doc_id", doc_id.as_str());
        trace!(record = %record.as_value(), "Assembling record");

        let overlap = self.overlap(record, &doc_id)?;
        let mut doc = Document::new(doc_id);

        for module in self.settings.modules.iter() {
            match module {
                Module::Type => doc.insert("type", doc_type),
                Module::Date => self.add_date(record, &mut doc),
                Module::Title => self.add_titles(record, &mut doc),
                Module::Fields => self.add_fields(record, &mut doc),
                Module::Artworks => {
                    if let Some(overlap) = &overlap {
                        self.add_artworks(overlap, &mut doc).await?;
                    }
                }
                Module::Persons => {
                    if let Some(overlap) = &overlap {
                        self.add_persons(overlap, &mut doc).await?;
                    }
                }
                Module::Views => self.add_views(record, overlap.as_ref(), &mut doc).await?,
            }
        }

        debug!(doc_id = %doc.id(), fields = doc.len(), "Assembled document");
        Ok(doc)
    }

    fn identifier(&self, record: &Record) -> Result<String, PipelineError> {
        record
            .path(&self.settings.id_path)
            .and_then(scalar_text)
            .ok_or_else(|| PipelineError::missing_identifier(&self.settings.id_path))
    }

    /// Whether any enabled module runs overlap searches.
    fn needs_anchor(&self) -> bool {
        self.settings
            .modules
            .iter()
            .filter(Module::uses_overlap_queries)
            .any(|module| {
                module != Module::Views
                    || self.settings.views.iter().any(ViewDefinition::is_constrained)
            })
    }

    /// The overlap query builder for the record's primary anchor. A missing
    /// anchor is only an error when some module needs it.
    fn overlap(
        &self,
        record: &Record,
        doc_id: &str,
    ) -> Result<Option<OverlapQueryBuilder>, PipelineError> {
        let anchor = record
            .first_target_with_selector(&self.settings.anchor_type)
            .and_then(|target| target.anchor());

        match anchor {
            Some(anchor) => Ok(Some(OverlapQueryBuilder::new(anchor))),
            None if self.needs_anchor() => Err(PipelineError::missing_anchor(
                doc_id,
                &self.settings.anchor_type,
            )),
            None => Ok(None),
        }
    }

    fn add_date(&self, record: &Record, doc: &mut Document) {
        let paths = &self.settings.dates;
        let fields = DateFields::from_record(record, &paths.actual, &paths.not_before, &paths.not_after);

        let range = contrive_date(&fields).unwrap_or_else(|| {
            warn!(doc_id = %doc.id(), "No date information, using placeholder range");
            DateRange::placeholder()
        });
        doc.insert("date", range);
    }

    fn add_titles(&self, record: &Record, doc: &mut Document) {
        match record.path(&self.settings.title_path) {
            Some(Value::Object(titles)) => {
                for (lang, title) in titles {
                    doc.insert(language_key("title", lang), title.clone());
                }
            }
            Some(other) => {
                warn!(doc_id = %doc.id(), title = %other, "Title is not keyed by language, skipping");
            }
            None => debug!(doc_id = %doc.id(), "Record has no title"),
        }
    }

    fn add_fields(&self, record: &Record, doc: &mut Document) {
        for (name, path) in &self.settings.fields {
            if let Some(value) = record.path(path) {
                doc.insert(name.clone(), value.clone());
            }
        }
    }

    async fn add_artworks(
        &self,
        overlap: &OverlapQueryBuilder,
        doc: &mut Document,
    ) -> Result<(), PipelineError> {
        let artworks = extract_artworks(&self.store, overlap).await?;
        for (lang, headings) in artworks {
            doc.insert(language_key("artworks", &lang), headings);
        }
        Ok(())
    }

    async fn add_persons(
        &self,
        overlap: &OverlapQueryBuilder,
        doc: &mut Document,
    ) -> Result<(), PipelineError> {
        let persons = extract_persons(&self.store, overlap).await?;
        if !persons.is_empty() {
            doc.insert("persons", persons);
        }
        Ok(())
    }

    async fn add_views(
        &self,
        record: &Record,
        overlap: Option<&OverlapQueryBuilder>,
        doc: &mut Document,
    ) -> Result<(), PipelineError> {
        let text_type = &self.settings.text_type;

        for view in &self.settings.views {
            if !view.is_constrained() {
                if let Some(text) = fetch_target_text(&self.texts, record, text_type).await {
                    doc.insert(view.field_name(), text);
                }
                continue;
            }

            let Some(overlap) = overlap else {
                continue;
            };
            let query = overlap.with_constraints(view.constraints.iter().cloned());
            let texts = extract_view_texts(&self.store, &self.texts, &query, text_type).await?;

            if texts.is_empty() {
                warn!(doc_id = %doc.id(), view = %view.name, "View matched no texts");
            } else {
                doc.insert(view.field_name(), texts);
            }
        }
        Ok(())
    }
}
