/// Library construction and pack ingestion.

use indexmap::IndexMap;
use thiserror::Error;

use crate::core::classify::{classify, Classification, FieldUpdate};
use crate::schema::document::Document;
use crate::schema::pack::{Pack, PackSet};
use crate::schema::record::{CharacterRecord, Library, LibraryItem};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no valid entries found")]
    NoValidEntries,
    #[error("pack '{0}' already exists")]
    PackExists(String),
}

/// Build a library from a normalized document: character records merged
/// by name in first-seen order, then narrative fragments in entry order.
pub fn build_library(document: &Document) -> Library {
    let mut characters: IndexMap<String, CharacterRecord> = IndexMap::new();
    let mut fragments = Vec::new();

    for entry in document.entries() {
        match classify(entry) {
            Classification::Loom(fragment) => fragments.push(fragment),
            Classification::Lumia { name, update } => {
                let record = characters
                    .entry(name.clone())
                    .or_insert_with(|| CharacterRecord::blank(name));
                apply_update(record, update);
            }
            Classification::Skip => {}
        }
    }

    let items = characters
        .into_values()
        .map(LibraryItem::Character)
        .chain(fragments.into_iter().map(LibraryItem::Fragment))
        .collect();
    Library::new(items)
}

fn apply_update(record: &mut CharacterRecord, update: FieldUpdate) {
    match update {
        FieldUpdate::Definition {
            image,
            author,
            physical,
        } => {
            // Metadata only lands when present; nothing clears a field.
            if image.is_some() {
                record.image = image;
            }
            if author.is_some() {
                record.author = author;
            }
            record.physical_definition = Some(physical);
        }
        FieldUpdate::Behavior(text) => record.behavior = Some(text),
        FieldUpdate::Personality {
            legacy_behavior,
            personality,
        } => {
            if record.behavior.is_none() {
                record.behavior = legacy_behavior;
            }
            record.personality = Some(personality);
        }
        FieldUpdate::Touch => {}
    }
}

impl PackSet {
    /// Ingest a document as a named pack.
    ///
    /// Fails with [`LibraryError::NoValidEntries`] when classification
    /// produces an empty library, and with [`LibraryError::PackExists`]
    /// when the name collides and `overwrite` is false, so the host can
    /// prompt before retrying. The pack set is untouched on failure.
    pub fn ingest(
        &mut self,
        name: &str,
        document: &Document,
        source_url: &str,
        overwrite: bool,
    ) -> Result<(), LibraryError> {
        let library = build_library(document);
        if library.is_empty() {
            return Err(LibraryError::NoValidEntries);
        }
        if self.get(name).is_some() && !overwrite {
            return Err(LibraryError::PackExists(name.to_string()));
        }

        log::info!("ingested pack {name:?} with {} items", library.len());
        self.insert(Pack {
            name: name.to_string(),
            items: library,
            source_url: source_url.to_string(),
        });
        Ok(())
    }

    /// Parse raw JSON and ingest it in one step.
    pub fn ingest_json(
        &mut self,
        name: &str,
        json: &str,
        source_url: &str,
        overwrite: bool,
    ) -> Result<(), LibraryError> {
        let document = Document::from_json(json)?;
        self.ingest(name, &document, source_url, overwrite)
    }
}
