//! SPARQL queries for each entity source.
//!
//! Variable names are the row keys the processor reads.

const LABEL_SERVICE: &str =
    r#"SERVICE wikibase:label { bd:serviceParam wikibase:language "fr,en,de,es". }"#;

/// People whose occupation is scientist (Q901) or researcher (Q1650915).
pub(super) fn scientists(limit: usize) -> String {
    format!(
        r#"SELECT ?item ?itemLabel ?itemDescription ?dateNaissance ?lieuNaissanceLabel ?domaineLabel ?image ?nationalityLabel
WHERE {{
  VALUES ?occupation {{ wd:Q1650915 wd:Q901 }}
  ?item wdt:P106 ?occupation.
  OPTIONAL {{ ?item wdt:P27 ?nationality. }}
  OPTIONAL {{ ?item wdt:P569 ?dateNaissance. }}
  OPTIONAL {{ ?item wdt:P19 ?lieuNaissance. }}
  OPTIONAL {{ ?item wdt:P101 ?domaine. }}
  OPTIONAL {{ ?item wdt:P18 ?image. }}
  {LABEL_SERVICE}
}}
LIMIT {limit}"#
    )
}

/// Instances of film (Q11424).
pub(super) fn movies(limit: usize) -> String {
    format!(
        r#"SELECT ?item ?itemLabel ?itemDescription ?realisateurLabel ?dateDeSortie ?genreLabel ?image
WHERE {{
  ?item wdt:P31 wd:Q11424.
  OPTIONAL {{ ?item wdt:P57 ?realisateur. }}
  OPTIONAL {{ ?item wdt:P577 ?dateDeSortie. }}
  OPTIONAL {{ ?item wdt:P136 ?genre. }}
  OPTIONAL {{ ?item wdt:P18 ?image. }}
  {LABEL_SERVICE}
}}
LIMIT {limit}"#
    )
}

/// Instances of country (Q6256).
pub(super) fn countries(limit: usize) -> String {
    format!(
        r#"SELECT ?item ?itemLabel ?itemDescription ?capitaleLabel ?continentLabel ?image
WHERE {{
  ?item wdt:P31 wd:Q6256.
  OPTIONAL {{ ?item wdt:P36 ?capitale. }}
  OPTIONAL {{ ?item wdt:P30 ?continent. }}
  OPTIONAL {{ ?item wdt:P18 ?image. }}
  {LABEL_SERVICE}
}}
LIMIT {limit}"#
    )
}
