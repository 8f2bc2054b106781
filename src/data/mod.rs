//! Core data models for the elements client
//!
//! This module contains the element record and collection types shared by the
//! client, the snapshot cache and the wire decoder.

pub mod elements;
pub mod query;

pub use elements::ElementsClient;
pub use query::ElementQuery;

use std::fmt;

use indexmap::map::Values;
use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single chemical element as served by the dataset endpoint
///
/// Only the fields the client filters or searches on are typed. Everything
/// else (mass, electron configuration, ...) is kept verbatim in `extra` and
/// written back out on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Chemical symbol, e.g. "H"
    ///
    /// Symbol-keyed payloads usually omit it from the record body; the
    /// collection decoder fills it in from the key.
    #[serde(default)]
    pub symbol: String,
    /// Atomic number
    pub number: u32,
    /// Localized display name
    pub name: String,
    /// English display name
    #[serde(rename = "nameEn")]
    pub name_en: String,
    /// Category tag, e.g. "noble-gas"
    pub category: String,
    /// Period (1-7)
    pub period: u8,
    /// Group (1-18); absent for lanthanides and actinides
    #[serde(default)]
    pub group: Option<u8>,
    /// Descriptive fields the client does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ElementRecord {
    /// Whether this record satisfies a free-text search
    ///
    /// `query_lower` must already be lowercased; `query` is the raw input and
    /// is compared against the atomic number verbatim.
    fn matches(&self, query: &str, query_lower: &str) -> bool {
        self.symbol.to_lowercase().contains(query_lower)
            || self.name.to_lowercase().contains(query_lower)
            || self.name_en.to_lowercase().contains(query_lower)
            || self.number.to_string() == query
    }
}

/// Elements keyed by symbol, in the order the server listed them
///
/// Decodes from either a symbol-keyed JSON object or a JSON array of records
/// that carry their own `symbol`. Always serializes as the keyed object.
/// Equality compares contents by symbol and ignores order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementCollection {
    records: IndexMap<String, ElementRecord>,
}

impl ElementCollection {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, replacing any record with the same symbol in place
    pub fn insert(&mut self, record: ElementRecord) {
        self.records.insert(record.symbol.clone(), record);
    }

    /// Looks up a record by its exact symbol
    pub fn get(&self, symbol: &str) -> Option<&ElementRecord> {
        self.records.get(symbol)
    }

    /// Looks up a record by atomic number
    pub fn get_by_number(&self, number: u32) -> Option<&ElementRecord> {
        self.records.values().find(|r| r.number == number)
    }

    /// Whether a record with this exact symbol is present
    pub fn contains(&self, symbol: &str) -> bool {
        self.records.contains_key(symbol)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in collection order
    pub fn iter(&self) -> Values<'_, String, ElementRecord> {
        self.records.values()
    }

    /// Symbols in collection order
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Case-insensitive search over symbol, name and English name, plus an
    /// exact match of the query against the atomic number
    ///
    /// Results keep collection order. An empty query matches every record.
    pub fn search(&self, query: &str) -> Vec<ElementRecord> {
        let query_lower = query.to_lowercase();
        self.records
            .values()
            .filter(|r| r.matches(query, &query_lower))
            .cloned()
            .collect()
    }

    /// Distinct categories in order of first occurrence
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for record in self.records.values() {
            if !categories.iter().any(|c| c == &record.category) {
                categories.push(record.category.clone());
            }
        }
        categories
    }
}

impl FromIterator<ElementRecord> for ElementCollection {
    fn from_iter<I: IntoIterator<Item = ElementRecord>>(iter: I) -> Self {
        let mut collection = Self::new();
        for record in iter {
            collection.insert(record);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a ElementCollection {
    type Item = &'a ElementRecord;
    type IntoIter = Values<'a, String, ElementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}

impl Serialize for ElementCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for (symbol, record) in &self.records {
            map.serialize_entry(symbol, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ElementCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CollectionVisitor)
    }
}

/// Accepts both wire shapes of a collection, preserving document order
struct CollectionVisitor;

impl<'de> Visitor<'de> for CollectionVisitor {
    type Value = ElementCollection;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of symbol to element or a list of elements")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut collection = ElementCollection::new();
        while let Some((symbol, mut record)) = map.next_entry::<String, ElementRecord>()? {
            // The key is the record's identity
            record.symbol = symbol;
            collection.insert(record);
        }
        Ok(collection)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut collection = ElementCollection::new();
        while let Some(record) = seq.next_element::<ElementRecord>()? {
            if record.symbol.is_empty() {
                return Err(de::Error::missing_field("symbol"));
            }
            collection.insert(record);
        }
        Ok(collection)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{record, sample_collection};
    use super::*;

    const KEYED_RESPONSE: &str = r#"{
        "H": {
            "number": 1,
            "name": "Водород",
            "nameEn": "Hydrogen",
            "category": "nonmetal",
            "period": 1,
            "group": 1,
            "mass": 1.008,
            "electronConfiguration": "1s1"
        },
        "He": {
            "number": 2,
            "name": "Гелий",
            "nameEn": "Helium",
            "category": "noble-gas",
            "period": 1,
            "group": 18,
            "mass": 4.0026
        }
    }"#;

    const ARRAY_RESPONSE: &str = r#"[
        {"symbol": "La", "number": 57, "name": "Лантан", "nameEn": "Lanthanum",
         "category": "lanthanide", "period": 6, "group": null},
        {"symbol": "Ce", "number": 58, "name": "Церий", "nameEn": "Cerium",
         "category": "lanthanide", "period": 6}
    ]"#;

    #[test]
    fn test_parse_keyed_collection_fills_symbol_from_key() {
        let collection: ElementCollection =
            serde_json::from_str(KEYED_RESPONSE).expect("Failed to parse keyed collection");

        assert_eq!(collection.len(), 2);
        let hydrogen = collection.get("H").expect("H should be present");
        assert_eq!(hydrogen.symbol, "H");
        assert_eq!(hydrogen.number, 1);
        assert_eq!(hydrogen.name_en, "Hydrogen");
        assert_eq!(hydrogen.group, Some(1));
    }

    #[test]
    fn test_parse_keeps_passthrough_fields() {
        let collection: ElementCollection = serde_json::from_str(KEYED_RESPONSE).unwrap();
        let hydrogen = collection.get("H").unwrap();

        assert_eq!(hydrogen.extra.get("mass"), Some(&serde_json::json!(1.008)));
        assert_eq!(
            hydrogen.extra.get("electronConfiguration"),
            Some(&serde_json::json!("1s1"))
        );
        assert!(!hydrogen.extra.contains_key("nameEn"));
    }

    #[test]
    fn test_parse_array_collection_preserves_order() {
        let collection: ElementCollection =
            serde_json::from_str(ARRAY_RESPONSE).expect("Failed to parse array collection");

        let symbols: Vec<&str> = collection.symbols().collect();
        assert_eq!(symbols, vec!["La", "Ce"]);
        assert_eq!(collection.get("La").unwrap().group, None);
        assert_eq!(collection.get("Ce").unwrap().group, None);
    }

    #[test]
    fn test_parse_array_without_symbol_fails() {
        let json = r#"[{"number": 1, "name": "Водород", "nameEn": "Hydrogen",
                       "category": "nonmetal", "period": 1}]"#;

        let result: Result<ElementCollection, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_scalar_body() {
        let result: Result<ElementCollection, _> = serde_json::from_str("42");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("map of symbol to element"));
    }

    #[test]
    fn test_parse_record_missing_required_field_fails() {
        let json = r#"{"H": {"number": 1, "name": "Водород", "category": "nonmetal", "period": 1}}"#;

        let result: Result<ElementCollection, _> = serde_json::from_str(json);
        assert!(result.is_err(), "nameEn is required");
    }

    #[test]
    fn test_serialize_uses_keyed_shape() {
        let collection = sample_collection();
        let json = serde_json::to_value(&collection).unwrap();

        assert!(json.is_object());
        assert_eq!(json["He"]["nameEn"], "Helium");
        assert_eq!(json["He"]["symbol"], "He");
        assert_eq!(json["Fm"]["group"], Value::Null);
    }

    #[test]
    fn test_insert_replaces_same_symbol_in_place() {
        let mut collection = sample_collection();
        collection.insert(record("He", 2, "Гелий", "Helium-4", "noble-gas", 1, Some(18)));

        assert_eq!(collection.len(), 6);
        assert_eq!(collection.symbols().nth(1), Some("He"));
        assert_eq!(collection.get("He").unwrap().name_en, "Helium-4");
    }

    #[test]
    fn test_search_by_symbol_returns_record_with_symbol() {
        let collection: ElementCollection =
            [record("H", 1, "Водород", "Hydrogen", "nonmetal", 1, Some(1))]
                .into_iter()
                .collect();

        let results = collection.search("H");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "H");
        assert_eq!(results[0].name, "Водород");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let collection = sample_collection();

        assert_eq!(collection.search("h"), collection.search("H"));
        assert_eq!(collection.search("NEON"), collection.search("neon"));
    }

    #[test]
    fn test_search_matches_localized_name() {
        let collection = sample_collection();

        let results = collection.search("гел");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "He");

        let results = collection.search("ЛИТИЙ");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "Li");
    }

    #[test]
    fn test_search_number_is_exact_match() {
        let collection: ElementCollection = [
            record("Xa", 1, "Альфа", "Alpha", "test", 1, None),
            record("Xb", 10, "Бета", "Beta", "test", 2, None),
            record("Xc", 100, "Гамма", "Gamma", "test", 7, None),
        ]
        .into_iter()
        .collect();

        let results = collection.search("1");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number, 1);
    }

    #[test]
    fn test_search_keeps_collection_order() {
        let collection = sample_collection();

        let symbols: Vec<String> = collection.search("e").into_iter().map(|r| r.symbol).collect();
        assert_eq!(symbols, vec!["H", "He", "Ne", "Fm"]);
    }

    #[test]
    fn test_search_without_match_is_empty() {
        let collection = sample_collection();
        assert!(collection.search("unobtainium").is_empty());
    }

    #[test]
    fn test_categories_are_distinct_in_first_occurrence_order() {
        let collection: ElementCollection = [
            record("He", 2, "Гелий", "Helium", "noble-gas", 1, Some(18)),
            record("Li", 3, "Литий", "Lithium", "alkali-metal", 2, Some(1)),
            record("Ne", 10, "Неон", "Neon", "noble-gas", 2, Some(18)),
        ]
        .into_iter()
        .collect();

        assert_eq!(collection.categories(), vec!["noble-gas", "alkali-metal"]);
    }

    #[test]
    fn test_lookup_by_number() {
        let collection = sample_collection();

        assert_eq!(collection.get_by_number(11).map(|r| r.symbol.as_str()), Some("Na"));
        assert!(collection.get_by_number(0).is_none());
        assert!(collection.contains("Fm"));
        assert!(!collection.contains("fm"));
    }
}
