//! Curated closed-class substitution table.
//!
//! Synonym dictionaries have weak coverage for function words ("the",
//! "and", "of") and for a few domain terms; this table supplies hand-picked
//! substitutions for them. Entries are unioned with dictionary results by
//! the lexical generator, never consulted alone.

use ahash::AHashMap;
use lazy_static::lazy_static;

lazy_static! {
    static ref CURATED: AHashMap<&'static str, &'static [&'static str]> = {
        let mut m: AHashMap<&'static str, &'static [&'static str]> = AHashMap::new();
        m.insert("the", &["a", "this", "that", "such"]);
        m.insert("how", &["what", "why", "when"]);
        m.insert("you", &["we", "they", "people"]);
        m.insert("today", &["now", "currently", "this day", "present"]);
        m.insert("world", &["earth", "planet", "globe", "universe"]);
        m.insert("hello", &["hi", "hey", "greetings"]);
        m.insert("and", &["plus", "with", "also"]);
        m.insert("or", &["either", "maybe"]);
        m.insert("to", &["toward", "into"]);
        m.insert("of", &["from", "about"]);
        m.insert("in", &["at", "on", "within"]);
        m.insert("for", &["toward", "about"]);
        m.insert("with", &["using", "via"]);
        m.insert("by", &["via", "through"]);
        m.insert("programming", &["coding", "development", "software"]);
        m.insert("artificial", &["fake", "synthetic", "man-made"]);
        m.insert("intelligence", &["smarts", "brains", "wisdom"]);
        m
    };
}

/// Look up curated substitutions for a word (case-insensitive).
pub fn substitutions(word: &str) -> Vec<String> {
    CURATED
        .get(word.to_lowercase().as_str())
        .map(|subs| subs.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}
