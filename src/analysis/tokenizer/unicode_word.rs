//! Unicode word tokenizer for surface-regime languages.
//!
//! Splits text using Unicode word boundary rules (UAX #29), filters out
//! punctuation and whitespace segments, and attaches a lowercase reading
//! plus a heuristic POS tag to each word. For surface-regime languages the
//! phonetic unit *is* the written form, so the reading is simply the
//! case-folded surface.
//!
//! # Examples
//!
//! ```
//! use lipogram::analysis::tokenizer::Tokenizer;
//! use lipogram::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens = tokenizer.tokenize("The cat sat.").unwrap();
//! assert_eq!(tokens[0].surface, "The");
//! assert_eq!(tokens[0].reading, "the");
//! assert_eq!(tokens[0].pos, "DET");
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::pos::tag_word;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A surface-regime tokenizer based on Unicode word boundaries.
///
/// Non-word segments (punctuation, whitespace) are dropped, matching the
/// behavior expected by the rewrite engine: only replaceable word tokens
/// flow through the constraint loop, and the assembler restores the
/// original punctuation positionally.
#[derive(Debug, Clone, Default)]
pub struct UnicodeWordTokenizer {
    /// Whether to attach heuristic POS tags (when false, every token is
    /// tagged "NOUN").
    tag_pos: bool,
}

impl UnicodeWordTokenizer {
    /// Create a new tokenizer with POS tagging enabled.
    pub fn new() -> Self {
        UnicodeWordTokenizer { tag_pos: true }
    }

    /// Create a tokenizer without POS tagging.
    pub fn without_pos_tagging() -> Self {
        UnicodeWordTokenizer { tag_pos: false }
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, sentence: &str) -> Result<Vec<Token>> {
        let tokens = sentence
            .unicode_words()
            .map(|word| {
                let pos = if self.tag_pos { tag_word(word) } else { "NOUN" };
                Token::surface_only(word, pos)
            })
            .collect();
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
