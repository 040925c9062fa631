//! Entity document model.
//!
//! An [`EntityDocument`] is the unit stored in the search index. Its JSON
//! shape is:
//!
//! ```json
//! {
//!   "uri": "http://www.wikidata.org/entity/Q937",
//!   "name": "Albert Einstein",
//!   "description": "physicien théoricien",
//!   "type": "chercheur",
//!   "image": "http://commons.wikimedia.org/...",
//!   "details": { "birth_date": "1879-03-14", "domain": "physique" }
//! }
//! ```
//!
//! The `type` tag and the `details` payload are one adjacently tagged enum,
//! so a document can never carry detail fields belonging to another type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of entity a document describes.
///
/// Serialized with the labels used in the index (`chercheur`, `film`, `pays`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    #[serde(rename = "chercheur")]
    Scientist,
    #[serde(rename = "film")]
    Movie,
    #[serde(rename = "pays")]
    Country,
}

impl EntityType {
    /// The label stored in the `type` keyword field.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Scientist => "chercheur",
            EntityType::Movie => "film",
            EntityType::Country => "pays",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Details carried by scientist documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScientistDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
}

/// Details carried by movie documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

/// Details carried by country documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
}

/// Type tag plus the matching detail set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum EntityDetails {
    #[serde(rename = "chercheur")]
    Scientist(ScientistDetails),
    #[serde(rename = "film")]
    Movie(MovieDetails),
    #[serde(rename = "pays")]
    Country(CountryDetails),
}

impl EntityDetails {
    /// The entity type implied by this detail set.
    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityDetails::Scientist(_) => EntityType::Scientist,
            EntityDetails::Movie(_) => EntityType::Movie,
            EntityDetails::Country(_) => EntityType::Country,
        }
    }
}

/// A document in the entity search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDocument {
    /// Knowledge-graph URI, also used as the index document id.
    pub uri: String,
    /// Display name, the primary match target.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub details: EntityDetails,
}

impl EntityDocument {
    /// Create a document with no description or image.
    pub fn new(uri: impl Into<String>, name: impl Into<String>, details: EntityDetails) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: None,
            image: None,
            details,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        self.details.entity_type()
    }
}
