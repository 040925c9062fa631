//! Structured query clauses.
//!
//! Clauses are produced by the parser and rendered to the search engine's
//! JSON query DSL by the composer.

use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use crate::fields;
use entity_search_shared::EntityType;

/// A date interval; either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Inclusive lower bound.
    pub gte: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub lte: Option<NaiveDate>,
}

impl DateRange {
    /// Everything up to Dec 31 of `year`.
    pub fn before(year: i32) -> Option<Self> {
        Some(Self {
            gte: None,
            lte: Some(NaiveDate::from_ymd_opt(year, 12, 31)?),
        })
    }

    /// Everything from Jan 1 of `year`.
    pub fn since(year: i32) -> Option<Self> {
        Some(Self {
            gte: Some(NaiveDate::from_ymd_opt(year, 1, 1)?),
            lte: None,
        })
    }

    /// Jan 1 of `first` through Dec 31 of `last`.
    pub fn years(first: i32, last: i32) -> Option<Self> {
        Some(Self {
            gte: Some(NaiveDate::from_ymd_opt(first, 1, 1)?),
            lte: Some(NaiveDate::from_ymd_opt(last, 12, 31)?),
        })
    }

    fn to_query(self) -> Value {
        let mut bounds = Map::new();
        if let Some(gte) = self.gte {
            bounds.insert("gte".to_string(), json!(gte.format("%Y-%m-%d").to_string()));
        }
        if let Some(lte) = self.lte {
            bounds.insert("lte".to_string(), json!(lte.format("%Y-%m-%d").to_string()));
        }
        Value::Object(bounds)
    }
}

/// A single query condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Exact keyword match.
    Term { field: &'static str, value: String },
    /// Analyzed full-text match.
    Match { field: &'static str, value: String },
    /// Analyzed phrase match.
    MatchPhrase { field: &'static str, value: String },
    /// Date interval on one field.
    Range { field: &'static str, range: DateRange },
    /// At least one of the nested clauses must hold.
    AnyOf(Vec<Clause>),
}

impl Clause {
    /// Exact filter on the entity type.
    pub fn entity_type(entity_type: EntityType) -> Self {
        Clause::Term {
            field: fields::TYPE,
            value: entity_type.as_str().to_string(),
        }
    }

    /// Render the clause in the search engine query DSL.
    pub fn to_query(&self) -> Value {
        match self {
            Clause::Term { field, value } => json!({ "term": { *field: value } }),
            Clause::Match { field, value } => json!({ "match": { *field: value } }),
            Clause::MatchPhrase { field, value } => json!({ "match_phrase": { *field: value } }),
            Clause::Range { field, range } => json!({ "range": { *field: range.to_query() } }),
            Clause::AnyOf(clauses) => json!({
                "bool": {
                    "should": clauses.iter().map(Clause::to_query).collect::<Vec<_>>(),
                    "minimum_should_match": 1
                }
            }),
        }
    }
}
