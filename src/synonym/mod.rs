//! Synonym sources for the lexical-semantic rewriting strategy.
//!
//! Candidates come from two places: a POS-filtered synonym dictionary
//! ([`dictionary::SynonymDictionary`], fst-backed, loadable from JSON) and
//! a small curated substitution table ([`curated`]) covering function
//! words and domain terms where dictionary coverage is weak.

pub mod curated;
pub mod dictionary;

use crate::analysis::pos::PosClass;
use crate::error::Result;

/// Trait for synonym dictionary services.
pub trait SynonymProvider: Send + Sync {
    /// Return synonyms for `word` restricted to the given POS class.
    ///
    /// The returned list may be empty; order is unspecified (ranking is the
    /// candidate generator's job, not the dictionary's).
    fn synonyms(&self, word: &str, pos: PosClass) -> Result<Vec<String>>;

    /// Get the name of this provider (for debugging and tracing).
    fn name(&self) -> &'static str;
}
