//! The extractor stages of the parsing pipeline.
//!
//! Every stage has the [`Extractor`](super::Extractor) signature and leaves
//! the text untouched when it does not recognize anything.

use once_cell::sync::Lazy;
use regex::Regex;

use super::vocabulary::{
    AttributeTrigger, ATTRIBUTE_TRIGGERS, DIRECTOR_PATTERN, NATIONALITIES, REGIONS,
    TYPE_KEYWORDS, YEAR_PATTERN,
};
use super::{contains_word, remove_span, remove_word, QueryClauses};
use crate::clause::{Clause, DateRange};
use crate::fields;
use entity_search_shared::EntityType;

static YEAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(YEAR_PATTERN).expect("year pattern is a valid regex"));

static DIRECTOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DIRECTOR_PATTERN).expect("director pattern is a valid regex"));

static ATTRIBUTE_REGEXES: Lazy<Vec<(AttributeTrigger, Regex)>> = Lazy::new(|| {
    ATTRIBUTE_TRIGGERS
        .iter()
        .map(|trigger| {
            let pattern = format!(r"\b{}\s+([\w-]+)", regex::escape(trigger.keyword));
            let regex = Regex::new(&pattern).expect("attribute pattern is a valid regex");
            (*trigger, regex)
        })
        .collect()
});

/// Detect the first entity-type keyword and filter on it.
pub(super) fn entity_type(text: String, mut clauses: QueryClauses) -> (String, QueryClauses) {
    for (entity_type, keywords) in TYPE_KEYWORDS {
        for keyword in keywords.iter() {
            if contains_word(&text, keyword) {
                clauses.detected_type = Some(*entity_type);
                clauses.filter.push(Clause::entity_type(*entity_type));
                return (remove_word(&text, keyword), clauses);
            }
        }
    }
    (text, clauses)
}

/// Turn "avant 1900", "depuis 2010", "en 2009" or "dans les années 1980"
/// into a date-range filter.
pub(super) fn year(text: String, mut clauses: QueryClauses) -> (String, QueryClauses) {
    let Some(captures) = YEAR_REGEX.captures(&text) else {
        return (text, clauses);
    };
    let (Some(whole), Some(qualifier), Some(year)) =
        (captures.get(0), captures.get(1), captures.get(2))
    else {
        return (text, clauses);
    };
    let Ok(year) = year.as_str().parse::<i32>() else {
        return (text, clauses);
    };

    let range = match qualifier.as_str() {
        "avant" => DateRange::before(year),
        "après" | "apres" | "depuis" => DateRange::since(year),
        "en" => DateRange::years(year, year),
        _ => DateRange::years(year, year + 9),
    };
    let Some(range) = range else {
        return (text, clauses);
    };

    let mut date_fields = Vec::with_capacity(2);
    if clauses.detected_type != Some(EntityType::Movie) {
        date_fields.push(fields::BIRTH_DATE);
    }
    if clauses.detected_type != Some(EntityType::Scientist) {
        date_fields.push(fields::RELEASE_DATE);
    }

    clauses.filter.push(Clause::AnyOf(
        date_fields
            .into_iter()
            .map(|field| Clause::Range { field, range })
            .collect(),
    ));

    (remove_span(&text, whole.range()), clauses)
}

/// Capture the name following "réalisé par", "film de" or "par".
pub(super) fn director(text: String, mut clauses: QueryClauses) -> (String, QueryClauses) {
    let Some(captures) = DIRECTOR_REGEX.captures(&text) else {
        return (text, clauses);
    };
    let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
        return (text, clauses);
    };
    let name = name.as_str().trim();
    if name.is_empty() {
        return (text, clauses);
    }

    clauses.must.push(Clause::MatchPhrase {
        field: fields::DIRECTOR,
        value: name.to_string(),
    });
    if clauses.detected_type.is_none() {
        clauses.filter.push(Clause::entity_type(EntityType::Movie));
    }

    (remove_span(&text, whole.range()), clauses)
}

/// Capture the token following each attribute keyword ("genre", "domaine", ...).
pub(super) fn attribute(mut text: String, mut clauses: QueryClauses) -> (String, QueryClauses) {
    for (trigger, regex) in ATTRIBUTE_REGEXES.iter() {
        if trigger.requires_detected_type && clauses.detected_type != Some(trigger.implied_type) {
            continue;
        }

        let Some(captures) = regex.captures(&text) else {
            continue;
        };
        let (Some(whole), Some(value)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if trigger.rejects_places && is_place(value.as_str()) {
            continue;
        }

        clauses.must.push(Clause::Match {
            field: trigger.field,
            value: value.as_str().to_string(),
        });
        if clauses.detected_type.is_none() {
            clauses.filter.push(Clause::entity_type(trigger.implied_type));
        }

        let span = whole.range();
        text = remove_span(&text, span);
    }
    (text, clauses)
}

/// Whether `word` (lowercase) is a known country, nationality or region.
fn is_place(word: &str) -> bool {
    REGIONS.contains(&word)
        || NATIONALITIES
            .iter()
            .any(|(adjective, country)| *adjective == word || country.to_lowercase() == word)
}

/// Map the first nationality adjective to its country.
pub(super) fn nationality(text: String, mut clauses: QueryClauses) -> (String, QueryClauses) {
    for (adjective, country) in NATIONALITIES {
        if contains_word(&text, adjective) {
            clauses.must.push(Clause::Match {
                field: fields::NATIONALITY,
                value: country.to_string(),
            });
            if clauses.detected_type.is_none() {
                clauses.filter.push(Clause::entity_type(EntityType::Scientist));
            }
            return (remove_word(&text, adjective), clauses);
        }
    }
    (text, clauses)
}
