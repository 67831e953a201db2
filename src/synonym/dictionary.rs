//! POS-aware synonym dictionary.
//!
//! Uses FST (Finite State Transducer) for memory-efficient storage and
//! fast lookup. Keys are `word<TAB>pos-class-key`, values index into the
//! synonym lists. Lookup is case-insensitive on the word.

use std::sync::Arc;

use fst::{Map, MapBuilder};
use serde::Deserialize;

use crate::analysis::pos::PosClass;
use crate::error::{LipogramError, Result};
use crate::synonym::SynonymProvider;

/// One dictionary record as stored in the JSON file.
///
/// Example file:
/// ```json
/// [
///   {"word": "cat", "pos": "NOUN", "synonyms": ["feline", "kitty"]},
///   {"word": "sat", "pos": "VERB", "synonyms": ["perched", "rested"]}
/// ]
/// ```
#[derive(Debug, Deserialize)]
struct SynonymRecord {
    word: String,
    pos: String,
    synonyms: Vec<String>,
}

/// Synonym dictionary backed by an FST map.
///
/// FST keeps large dictionaries (100k+ entries) compact while preserving
/// fast exact-key lookup. The dictionary is immutable after construction
/// and cheap to clone.
#[derive(Debug, Clone)]
pub struct SynonymDictionary {
    /// FST map: `word\tpos` -> index into `synonym_lists`
    fst_map: Arc<Map<Vec<u8>>>,
    /// Actual synonym lists indexed by FST values
    synonym_lists: Arc<Vec<Vec<String>>>,
}

impl Default for SynonymDictionary {
    fn default() -> Self {
        Self::empty()
    }
}

impl SynonymDictionary {
    /// Create an empty dictionary.
    pub fn empty() -> Self {
        let builder = MapBuilder::memory();
        let fst_bytes = builder.into_inner().expect("empty fst build cannot fail");
        let fst_map = Map::new(fst_bytes).expect("empty fst is always valid");

        SynonymDictionary {
            fst_map: Arc::new(fst_map),
            synonym_lists: Arc::new(Vec::new()),
        }
    }

    /// Load a synonym dictionary from a JSON file of records.
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LipogramError::dictionary(format!(
                "Failed to read synonym dictionary file '{path}': {e}"
            ))
        })?;

        let records: Vec<SynonymRecord> = serde_json::from_str(&content).map_err(|e| {
            LipogramError::dictionary(format!(
                "Failed to parse synonym dictionary JSON from '{path}': {e}"
            ))
        })?;

        Self::from_records(records)
    }

    /// Build a dictionary from `(word, pos, synonyms)` entries.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, PosClass, Vec<String>)>,
    {
        let mut keyed: Vec<(String, Vec<String>)> = Vec::new();
        for (word, pos, synonyms) in entries {
            keyed.push((Self::key(&word, pos), synonyms));
        }

        // FST construction requires sorted, unique keys; merge duplicates.
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        let mut merged: Vec<(String, Vec<String>)> = Vec::new();
        for (key, synonyms) in keyed {
            match merged.last_mut() {
                Some((last_key, last_syns)) if *last_key == key => {
                    for s in synonyms {
                        if !last_syns.contains(&s) {
                            last_syns.push(s);
                        }
                    }
                }
                _ => merged.push((key, synonyms)),
            }
        }

        let mut builder = MapBuilder::memory();
        let mut synonym_lists = Vec::with_capacity(merged.len());
        for (index, (key, synonyms)) in merged.into_iter().enumerate() {
            builder.insert(key.as_bytes(), index as u64).map_err(|e| {
                LipogramError::dictionary(format!("Failed to build synonym FST: {e}"))
            })?;
            synonym_lists.push(synonyms);
        }

        let fst_bytes = builder
            .into_inner()
            .map_err(|e| LipogramError::dictionary(format!("Failed to finish synonym FST: {e}")))?;
        let fst_map = Map::new(fst_bytes)
            .map_err(|e| LipogramError::dictionary(format!("Invalid synonym FST: {e}")))?;

        Ok(SynonymDictionary {
            fst_map: Arc::new(fst_map),
            synonym_lists: Arc::new(synonym_lists),
        })
    }

    fn from_records(records: Vec<SynonymRecord>) -> Result<Self> {
        Self::from_entries(records.into_iter().map(|r| {
            let pos = PosClass::from_tag(&r.pos);
            (r.word, pos, r.synonyms)
        }))
    }

    fn key(word: &str, pos: PosClass) -> String {
        format!("{}\t{}", word.to_lowercase(), pos.key())
    }

    /// Number of `(word, pos)` entries.
    pub fn len(&self) -> usize {
        self.synonym_lists.len()
    }

    /// Check if the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.synonym_lists.is_empty()
    }
}

impl SynonymProvider for SynonymDictionary {
    fn synonyms(&self, word: &str, pos: PosClass) -> Result<Vec<String>> {
        let key = Self::key(word, pos);
        match self.fst_map.get(key.as_bytes()) {
            Some(index) => Ok(self
                .synonym_lists
                .get(index as usize)
                .cloned()
                .unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &'static str {
        "fst_dictionary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> SynonymDictionary {
        SynonymDictionary::from_entries(vec![
            (
                "cat".to_string(),
                PosClass::Noun,
                vec!["feline".to_string(), "kitty".to_string()],
            ),
            (
                "sat".to_string(),
                PosClass::Verb,
                vec!["perched".to_string()],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let dict = sample();
        let syns = dict.synonyms("cat", PosClass::Noun).unwrap();
        assert_eq!(syns, vec!["feline", "kitty"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dict = sample();
        let syns = dict.synonyms("Cat", PosClass::Noun).unwrap();
        assert_eq!(syns, vec!["feline", "kitty"]);
    }

    #[test]
    fn test_pos_filter() {
        let dict = sample();
        assert!(dict.synonyms("cat", PosClass::Verb).unwrap().is_empty());
        assert_eq!(
            dict.synonyms("sat", PosClass::Verb).unwrap(),
            vec!["perched"]
        );
    }

    #[test]
    fn test_missing_word() {
        let dict = sample();
        assert!(dict.synonyms("dog", PosClass::Noun).unwrap().is_empty());
    }

    #[test]
    fn test_empty_dictionary() {
        let dict = SynonymDictionary::empty();
        assert!(dict.is_empty());
        assert!(dict.synonyms("cat", PosClass::Noun).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_entries_merged() {
        let dict = SynonymDictionary::from_entries(vec![
            (
                "big".to_string(),
                PosClass::Adjective,
                vec!["large".to_string()],
            ),
            (
                "big".to_string(),
                PosClass::Adjective,
                vec!["large".to_string(), "huge".to_string()],
            ),
        ])
        .unwrap();

        assert_eq!(dict.len(), 1);
        assert_eq!(
            dict.synonyms("big", PosClass::Adjective).unwrap(),
            vec!["large", "huge"]
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"word": "cat", "pos": "NOUN", "synonyms": ["feline"]}}]"#
        )
        .unwrap();

        let dict = SynonymDictionary::load_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(dict.synonyms("cat", PosClass::Noun).unwrap(), vec!["feline"]);
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(SynonymDictionary::load_from_file("/nonexistent/syns.json").is_err());
    }
}
