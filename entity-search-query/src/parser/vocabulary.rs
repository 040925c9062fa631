//! Fixed vocabulary recognized by the extractors.
//!
//! Every table is scanned in declaration order and the order matters: the
//! first entry that matches wins where an extractor stops at one match.

use entity_search_shared::EntityType;

use crate::fields;

/// Surface forms naming an entity type.
pub const TYPE_KEYWORDS: &[(EntityType, &[&str])] = &[
    (EntityType::Movie, &["film", "films"]),
    (
        EntityType::Scientist,
        &["chercheur", "chercheurs", "scientifique", "scientifiques"],
    ),
    (EntityType::Country, &["pays"]),
];

/// Qualifiers accepted in front of a four-digit year.
pub const YEAR_PATTERN: &str =
    r"\b(avant|après|apres|en|depuis|dans les années|dans les annees)\s*([0-9]{4})\b";

/// Phrases introducing a director name.
pub const DIRECTOR_PATTERN: &str = r"\b(?:film de|réalisé par|realise par|par)\s+([\w\s-]+)";

/// A keyword whose following token is the value of a detail field.
#[derive(Debug, Clone, Copy)]
pub struct AttributeTrigger {
    pub keyword: &'static str,
    pub field: &'static str,
    /// Type the attribute belongs to, used as a filter when none was detected.
    pub implied_type: EntityType,
    /// Only fire when `implied_type` was named explicitly in the query.
    pub requires_detected_type: bool,
    /// Skip values that name a place ("en france", "en europe").
    pub rejects_places: bool,
}

pub const ATTRIBUTE_TRIGGERS: &[AttributeTrigger] = &[
    AttributeTrigger {
        keyword: "genre",
        field: fields::GENRE,
        implied_type: EntityType::Movie,
        requires_detected_type: false,
        rejects_places: false,
    },
    AttributeTrigger {
        keyword: "domaine",
        field: fields::DOMAIN,
        implied_type: EntityType::Scientist,
        requires_detected_type: false,
        rejects_places: false,
    },
    // "chercheur en physique"
    AttributeTrigger {
        keyword: "en",
        field: fields::DOMAIN,
        implied_type: EntityType::Scientist,
        requires_detected_type: true,
        rejects_places: true,
    },
];

/// Nationality adjectives and the country name stored in the index.
pub const NATIONALITIES: &[(&str, &str)] = &[
    ("français", "France"),
    ("française", "France"),
    ("françaises", "France"),
    ("francais", "France"),
    ("francaise", "France"),
    ("américain", "États-Unis"),
    ("américaine", "États-Unis"),
    ("américains", "États-Unis"),
    ("américaines", "États-Unis"),
    ("americain", "États-Unis"),
    ("americaine", "États-Unis"),
    ("britannique", "Royaume-Uni"),
    ("britanniques", "Royaume-Uni"),
    ("allemand", "Allemagne"),
    ("allemande", "Allemagne"),
    ("allemands", "Allemagne"),
    ("allemandes", "Allemagne"),
    ("italien", "Italie"),
    ("italienne", "Italie"),
    ("italiens", "Italie"),
    ("italiennes", "Italie"),
    ("espagnol", "Espagne"),
    ("espagnole", "Espagne"),
    ("espagnols", "Espagne"),
    ("espagnoles", "Espagne"),
    ("canadien", "Canada"),
    ("canadienne", "Canada"),
    ("canadiens", "Canada"),
    ("canadiennes", "Canada"),
    ("japonais", "Japon"),
    ("japonaise", "Japon"),
    ("japonaises", "Japon"),
    ("russe", "Russie"),
    ("russes", "Russie"),
    ("chinois", "Chine"),
    ("chinoise", "Chine"),
    ("chinoises", "Chine"),
    ("suisse", "Suisse"),
    ("suisses", "Suisse"),
    ("belge", "Belgique"),
    ("belges", "Belgique"),
];

/// Regions that are not in [`NATIONALITIES`] but commonly follow "en".
pub const REGIONS: &[&str] = &[
    "europe",
    "afrique",
    "asie",
    "amérique",
    "amerique",
    "océanie",
    "oceanie",
];
