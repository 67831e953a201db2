//! Part-of-speech classes and heuristic tagging.
//!
//! Tokenizers report POS tags in whatever tag set their backing dictionary
//! uses (Universal Dependencies tags, Penn tags, UniDic pos1 values). The
//! synonym dictionary only distinguishes four coarse classes, so every tag
//! is funneled through [`PosClass::from_tag`] before lookup.
//!
//! The surface tokenizer has no statistical tagger behind it; it uses a
//! closed-class lexicon plus a handful of suffix rules, defaulting to noun.

use std::fmt;

use ahash::AHashMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Coarse part-of-speech class used for synonym dictionary lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosClass {
    /// Nouns (default class for unknown words)
    Noun,
    /// Verbs
    Verb,
    /// Adjectives
    Adjective,
    /// Adverbs
    Adverb,
    /// Everything else (determiners, pronouns, particles, ...)
    Other,
}

impl PosClass {
    /// Map an arbitrary POS tag string to a coarse class.
    ///
    /// Understands Universal Dependencies tags (`NOUN`, `VERB`, ...), Penn
    /// Treebank prefixes (`NN*`, `VB*`, `JJ*`, `RB*`), and UniDic pos1
    /// values (名詞, 動詞, 形容詞, 副詞). Unknown tags map to `Noun`, which
    /// keeps synonym lookup permissive for open-class words.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "名詞" => return PosClass::Noun,
            "動詞" => return PosClass::Verb,
            "形容詞" => return PosClass::Adjective,
            "副詞" => return PosClass::Adverb,
            "助詞" | "助動詞" | "接続詞" | "連体詞" | "感動詞" | "記号" => {
                return PosClass::Other;
            }
            _ => {}
        }

        let upper = tag.to_uppercase();
        if upper == "NOUN" || upper == "PROPN" || upper.starts_with("NN") {
            PosClass::Noun
        } else if upper == "VERB" || upper == "AUX" || upper.starts_with("VB") {
            PosClass::Verb
        } else if upper == "ADJ" || upper.starts_with("JJ") {
            PosClass::Adjective
        } else if upper == "ADV" || upper.starts_with("RB") {
            PosClass::Adverb
        } else if matches!(
            upper.as_str(),
            "DET" | "PRON" | "ADP" | "CCONJ" | "SCONJ" | "CONJ" | "PART" | "INTJ" | "NUM" | "PUNCT"
        ) {
            PosClass::Other
        } else {
            PosClass::Noun
        }
    }

    /// Stable single-letter key used when composing dictionary keys.
    pub fn key(&self) -> &'static str {
        match self {
            PosClass::Noun => "n",
            PosClass::Verb => "v",
            PosClass::Adjective => "a",
            PosClass::Adverb => "r",
            PosClass::Other => "o",
        }
    }
}

impl fmt::Display for PosClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PosClass::Noun => "NOUN",
            PosClass::Verb => "VERB",
            PosClass::Adjective => "ADJ",
            PosClass::Adverb => "ADV",
            PosClass::Other => "OTHER",
        };
        write!(f, "{name}")
    }
}

lazy_static! {
    /// Closed-class English words with fixed tags.
    static ref CLOSED_CLASS: AHashMap<&'static str, &'static str> = {
        let mut m = AHashMap::new();
        for w in ["the", "a", "an", "this", "that", "these", "those", "such"] {
            m.insert(w, "DET");
        }
        for w in [
            "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
            "your", "his", "its", "our", "their", "who", "what", "which",
        ] {
            m.insert(w, "PRON");
        }
        for w in [
            "in", "on", "at", "of", "to", "for", "with", "by", "from", "about", "into", "over",
            "under", "toward", "via", "within", "through",
        ] {
            m.insert(w, "ADP");
        }
        for w in ["and", "or", "but", "nor", "so", "yet", "plus"] {
            m.insert(w, "CCONJ");
        }
        for w in ["is", "am", "are", "was", "were", "be", "been", "being", "do", "does", "did",
                  "have", "has", "had", "will", "would", "can", "could", "shall", "should",
                  "may", "might", "must"] {
            m.insert(w, "AUX");
        }
        for w in ["not", "how", "when", "where", "why", "now", "then", "here", "there", "very",
                  "too", "also", "just", "never", "always"] {
            m.insert(w, "ADV");
        }
        for w in ["hello", "hi", "hey", "greetings", "oh", "ah"] {
            m.insert(w, "INTJ");
        }
        m
    };
}

/// Tag a single word without statistical context.
///
/// Closed-class lexicon first, then suffix rules, then the noun default.
pub fn tag_word(word: &str) -> &'static str {
    let lower = word.to_lowercase();
    if let Some(tag) = CLOSED_CLASS.get(lower.as_str()) {
        return tag;
    }
    if lower.chars().all(|c| c.is_ascii_digit()) {
        return "NUM";
    }
    if lower.len() > 4 && lower.ends_with("ly") {
        return "ADV";
    }
    if lower.len() > 4 && (lower.ends_with("ing") || lower.ends_with("ed")) {
        return "VERB";
    }
    if lower.len() > 5
        && (lower.ends_with("ous")
            || lower.ends_with("ful")
            || lower.ends_with("ive")
            || lower.ends_with("able")
            || lower.ends_with("less"))
    {
        return "ADJ";
    }
    "NOUN"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_universal() {
        assert_eq!(PosClass::from_tag("NOUN"), PosClass::Noun);
        assert_eq!(PosClass::from_tag("VERB"), PosClass::Verb);
        assert_eq!(PosClass::from_tag("ADJ"), PosClass::Adjective);
        assert_eq!(PosClass::from_tag("ADV"), PosClass::Adverb);
        assert_eq!(PosClass::from_tag("DET"), PosClass::Other);
    }

    #[test]
    fn test_from_tag_penn() {
        assert_eq!(PosClass::from_tag("NNS"), PosClass::Noun);
        assert_eq!(PosClass::from_tag("VBD"), PosClass::Verb);
        assert_eq!(PosClass::from_tag("JJR"), PosClass::Adjective);
        assert_eq!(PosClass::from_tag("RBS"), PosClass::Adverb);
    }

    #[test]
    fn test_from_tag_unidic() {
        assert_eq!(PosClass::from_tag("名詞"), PosClass::Noun);
        assert_eq!(PosClass::from_tag("動詞"), PosClass::Verb);
        assert_eq!(PosClass::from_tag("助詞"), PosClass::Other);
    }

    #[test]
    fn test_from_tag_unknown_defaults_to_noun() {
        assert_eq!(PosClass::from_tag("XYZZY"), PosClass::Noun);
    }

    #[test]
    fn test_tag_word_closed_class() {
        assert_eq!(tag_word("The"), "DET");
        assert_eq!(tag_word("with"), "ADP");
        assert_eq!(tag_word("and"), "CCONJ");
        assert_eq!(tag_word("you"), "PRON");
    }

    #[test]
    fn test_tag_word_suffix_rules() {
        assert_eq!(tag_word("quickly"), "ADV");
        assert_eq!(tag_word("running"), "VERB");
        assert_eq!(tag_word("beautiful"), "ADJ");
        assert_eq!(tag_word("42"), "NUM");
    }

    #[test]
    fn test_tag_word_noun_default() {
        assert_eq!(tag_word("cat"), "NOUN");
        assert_eq!(tag_word("mat"), "NOUN");
    }
}
