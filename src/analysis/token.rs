//! Token types for constrained rewriting.
//!
//! A [`Token`] is the unit the rewrite engine operates on: one
//! morphological unit of a sentence, annotated with its surface text, a
//! phonetic reading, and a part-of-speech tag.
//!
//! The `reading` field is what makes reading-regime constraint checking
//! possible: for Japanese it is the all-hiragana phonetic transcription of
//! the surface, for surface-regime languages it is simply the lowercased
//! surface. Both fields are checked independently against the banned set.
//!
//! # Examples
//!
//! ```
//! use lipogram::analysis::token::Token;
//!
//! let token = Token::new("家", "いえ", "名詞");
//! assert_eq!(token.surface, "家");
//! assert_eq!(token.reading, "いえ");
//!
//! let token = Token::surface_only("Hello", "INTJ");
//! assert_eq!(token.reading, "hello");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single analyzed token: surface form, phonetic reading, and POS tag.
///
/// Tokens are produced by a [`Tokenizer`](crate::analysis::tokenizer::Tokenizer)
/// and are immutable once created; the engine replaces whole tokens rather
/// than mutating them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The surface text of the token as it appears in the sentence.
    pub surface: String,

    /// The phonetic reading of the surface.
    ///
    /// All-hiragana transcription for reading-regime tokenizers; the
    /// lowercased surface for surface-regime tokenizers.
    pub reading: String,

    /// Part-of-speech tag in the tokenizer's native tag set.
    pub pos: String,
}

impl Token {
    /// Create a new token with explicit surface, reading, and POS.
    pub fn new<S, R, P>(surface: S, reading: R, pos: P) -> Self
    where
        S: Into<String>,
        R: Into<String>,
        P: Into<String>,
    {
        Token {
            surface: surface.into(),
            reading: reading.into(),
            pos: pos.into(),
        }
    }

    /// Create a surface-regime token whose reading is the lowercased surface.
    pub fn surface_only<S: Into<String>, P: Into<String>>(surface: S, pos: P) -> Self {
        let surface = surface.into();
        let reading = surface.to_lowercase();
        Token {
            surface,
            reading,
            pos: pos.into(),
        }
    }

    /// Check if the token surface is empty.
    pub fn is_empty(&self) -> bool {
        self.surface.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.surface)
    }
}
