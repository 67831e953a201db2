//! Banned-character sets and constraint checking.
//!
//! The constraint checker is the validity predicate of the whole system: a
//! string violates the constraint iff it contains any character of the
//! banned set. For reading-regime languages a token is checked twice,
//! independently, on its surface and on its phonetic reading; for
//! surface-regime languages the lowercased surface is the phonetic unit.
//!
//! Normalization happens once, at [`BannedSet`] construction. The checks
//! themselves never re-normalize, so the caller must feed readings and
//! surfaces folded the same way the set was built. Latin scripts compare
//! case-insensitively: members are lowercased and surfaces checked via
//! their lowercase reading.
//!
//! # Examples
//!
//! ```
//! use lipogram::constraint::BannedSet;
//!
//! let banned = BannedSet::case_insensitive(['E']).unwrap();
//! assert!(banned.contains_banned("The"));
//! assert!(!banned.contains_banned("cat"));
//! ```

use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::error::{LipogramError, Result};

/// Which representation of a token the constraint applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    /// Check both the surface form and the phonetic reading independently.
    Reading,
    /// Check the lowercased surface; the written form is the phonetic unit.
    Surface,
}

/// A set of banned characters.
///
/// Characters are compared by exact code point; case folding for Latin
/// scripts is applied at construction via [`BannedSet::case_insensitive`].
/// The set must be non-empty: an empty constraint makes every rewrite a
/// no-op and is treated as a caller error.
#[derive(Clone, Debug)]
pub struct BannedSet {
    chars: AHashSet<char>,
}

impl BannedSet {
    /// Create a banned set from characters, compared code-point exact.
    pub fn new<I: IntoIterator<Item = char>>(chars: I) -> Result<Self> {
        let chars: AHashSet<char> = chars.into_iter().collect();
        if chars.is_empty() {
            return Err(LipogramError::invalid_argument(
                "banned set must not be empty",
            ));
        }
        Ok(BannedSet { chars })
    }

    /// Create a case-insensitive banned set (members are lowercased).
    pub fn case_insensitive<I: IntoIterator<Item = char>>(chars: I) -> Result<Self> {
        Self::new(chars.into_iter().flat_map(|c| c.to_lowercase()))
    }

    /// Parse a comma-separated banned character spec, e.g. `"さ,い"` or `"e"`.
    ///
    /// Whitespace around entries is ignored; multi-character entries are an
    /// error since the constraint is defined over single characters.
    pub fn parse(spec: &str, regime: Regime) -> Result<Self> {
        let mut chars = Vec::new();
        for entry in spec.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let mut it = entry.chars();
            let c = it.next().ok_or_else(|| {
                LipogramError::invalid_argument("empty banned character entry")
            })?;
            if it.next().is_some() {
                return Err(LipogramError::invalid_argument(format!(
                    "banned entries must be single characters, got '{entry}'"
                )));
            }
            chars.push(c);
        }
        match regime {
            Regime::Surface => Self::case_insensitive(chars),
            Regime::Reading => Self::new(chars),
        }
    }

    /// Check whether `text` contains any banned character.
    pub fn contains_banned(&self, text: &str) -> bool {
        text.chars().any(|c| self.chars.contains(&c))
    }

    /// List the banned characters that occur in `text`, for diagnostics.
    pub fn banned_in(&self, text: &str) -> Vec<char> {
        let mut found = Vec::new();
        for c in text.chars() {
            if self.chars.contains(&c) && !found.contains(&c) {
                found.push(c);
            }
        }
        found
    }

    /// Check whether a token violates the constraint under the given regime.
    ///
    /// Reading regime: violation if either the surface or the reading
    /// contains a banned character. Surface regime: the reading (lowercased
    /// surface) alone carries the check.
    pub fn token_violates(&self, token: &Token, regime: Regime) -> bool {
        match regime {
            Regime::Reading => {
                self.contains_banned(&token.surface) || self.contains_banned(&token.reading)
            }
            Regime::Surface => self.contains_banned(&token.reading),
        }
    }

    /// Validate a final output text, returning every banned character found.
    ///
    /// The engine itself is best-effort and may emit unresolved tokens;
    /// callers needing a hard guarantee run this over the result.
    pub fn validate(&self, text: &str) -> Vec<char> {
        self.banned_in(text)
    }

    /// Number of banned characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// A banned set is never empty by construction.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Iterate over the banned characters in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &char> {
        self.chars.iter()
    }

    /// Render the set as a sorted, comma-separated list (stable for prompts).
    pub fn display_list(&self) -> String {
        let mut chars: Vec<char> = self.chars.iter().copied().collect();
        chars.sort_unstable();
        chars
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for BannedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.display_list())
    }
}
