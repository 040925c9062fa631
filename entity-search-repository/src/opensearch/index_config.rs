//! OpenSearch index configuration and mappings.
//!
//! This module defines the analysis settings and mappings for the entity index.

use serde_json::{json, Value};

/// Name of the custom analyzer applied to every French text field.
pub const FRENCH_ANALYZER: &str = "french_custom";

/// Configuration for the entity index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Index name the client reads from and writes to.
    pub name: String,
}

impl IndexConfig {
    /// Create a new index configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Get the index settings and mappings for the entity index.
///
/// The configuration includes:
/// - **french_custom analyzer**: standard tokenizer with lowercase, ASCII
///   folding, elision, French stopwords and a light French stemmer
/// - **Keyword fields**: `type` for exact filtering and `name.keyword`
/// - **Date fields**: birth and release dates used by range filters
pub fn get_index_settings() -> Value {
    let french_text = json!({ "type": "text", "analyzer": FRENCH_ANALYZER });

    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 0,
            "analysis": {
                "analyzer": {
                    FRENCH_ANALYZER: {
                        "type": "custom",
                        "tokenizer": "standard",
                        "filter": [
                            "lowercase",
                            "asciifolding",
                            "french_elision",
                            "french_stop",
                            "french_stemmer"
                        ]
                    }
                },
                "filter": {
                    "french_elision": {
                        "type": "elision",
                        "articles_case": true,
                        "articles": [
                            "l", "m", "t", "qu", "n", "s", "j", "d", "c",
                            "jusqu", "quoiqu", "lorsqu", "puisqu"
                        ]
                    },
                    "french_stop": {
                        "type": "stop",
                        "stopwords": "_french_"
                    },
                    "french_stemmer": {
                        "type": "stemmer",
                        "language": "light_french"
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "uri": {
                    "type": "keyword"
                },
                "name": {
                    "type": "text",
                    "analyzer": FRENCH_ANALYZER,
                    "fields": {
                        "keyword": { "type": "keyword" }
                    }
                },
                "description": french_text,
                "type": {
                    "type": "keyword"
                },
                "image": {
                    "type": "keyword",
                    "index": false
                },
                "details": {
                    "properties": {
                        "birth_date": { "type": "date" },
                        "release_date": { "type": "date" },
                        "birth_place": french_text,
                        "domain": french_text,
                        "nationality": french_text,
                        "director": french_text,
                        "genre": french_text,
                        "capital": french_text,
                        "continent": french_text
                    }
                }
            }
        }
    })
}
