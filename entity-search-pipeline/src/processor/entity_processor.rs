//! Entity processor implementation.
//!
//! Transforms binding rows into EntityDocument structures for indexing.

use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::collector::{Binding, EntitySource};
use entity_search_shared::{
    CountryDetails, EntityDetails, EntityDocument, MovieDetails, ScientistDetails,
};

/// Row variable holding the entity URI.
const ITEM: &str = "item";
/// Row variable holding the entity label.
const ITEM_LABEL: &str = "itemLabel";
const ITEM_DESCRIPTION: &str = "itemDescription";
const IMAGE: &str = "image";

/// Keep the `YYYY-MM-DD` prefix of a timestamp if it is a valid date.
///
/// Wikidata returns `1879-03-14T00:00:00Z`; BCE dates and partial dates
/// that do not parse are dropped.
pub fn clean_date(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Processor that transforms binding rows into search documents.
///
/// The processor is responsible for:
/// - Mapping source variables onto the typed detail set of each source
/// - Dropping rows that lack a URI or a name
/// - Normalizing dates
pub struct EntityProcessor {}

impl EntityProcessor {
    /// Create a new entity processor.
    pub fn new() -> Self {
        Self {}
    }

    /// Process the rows collected for one source.
    #[instrument(skip(self, rows), fields(source = source.label(), row_count = rows.len()))]
    pub fn process_batch(&self, source: EntitySource, rows: Vec<Binding>) -> Vec<EntityDocument> {
        let documents: Vec<EntityDocument> = rows
            .iter()
            .filter_map(|row| self.process_row(source, row))
            .collect();

        debug!(
            processed_count = documents.len(),
            dropped_count = rows.len() - documents.len(),
            "Processed row batch"
        );
        documents
    }

    /// Process a single row.
    fn process_row(&self, source: EntitySource, row: &Binding) -> Option<EntityDocument> {
        let (uri, name) = match (text(row, ITEM), text(row, ITEM_LABEL)) {
            (Some(uri), Some(name)) => (uri, name),
            _ => {
                debug!(source = source.label(), row = ?row.keys().collect::<Vec<_>>(), "Skipping row with no uri or name");
                return None;
            }
        };

        let details = match source {
            EntitySource::Scientists => EntityDetails::Scientist(ScientistDetails {
                birth_date: text(row, "dateNaissance").and_then(|d| clean_date(&d)),
                birth_place: text(row, "lieuNaissanceLabel"),
                domain: text(row, "domaineLabel"),
                nationality: text(row, "nationalityLabel"),
            }),
            EntitySource::Movies => EntityDetails::Movie(MovieDetails {
                director: text(row, "realisateurLabel"),
                release_date: text(row, "dateDeSortie").and_then(|d| clean_date(&d)),
                genre: text(row, "genreLabel"),
            }),
            EntitySource::Countries => EntityDetails::Country(CountryDetails {
                capital: text(row, "capitaleLabel"),
                continent: text(row, "continentLabel"),
            }),
        };

        let mut doc = EntityDocument::new(uri, name, details);
        doc.description = text(row, ITEM_DESCRIPTION);
        doc.image = text(row, IMAGE);
        Some(doc)
    }
}

impl Default for EntityProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-blank value bound to `key`.
fn text(row: &Binding, key: &str) -> Option<String> {
    row.get(key)
        .map(|binding| binding.value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
