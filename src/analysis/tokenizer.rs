//! Tokenizer implementations for constrained rewriting.
//!
//! Tokenizers split a sentence into [`Token`]s annotated with surface,
//! reading, and part-of-speech. Two regimes are supported:
//!
//! - [`unicode_word::UnicodeWordTokenizer`] - surface-regime tokenization
//!   on Unicode word boundaries with heuristic POS tagging
//! - [`lindera::LinderaTokenizer`] - reading-regime Japanese morphological
//!   analysis (requires the `lindera` feature)
//!
//! # Examples
//!
//! ```
//! use lipogram::analysis::tokenizer::Tokenizer;
//! use lipogram::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens = tokenizer.tokenize("Hello world").unwrap();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::Token;
use crate::error::Result;

/// Trait for tokenizers that convert a sentence into annotated tokens.
///
/// Implementations must be deterministic for a given input and must not
/// fail on well-formed text. The trait requires `Send + Sync` so a single
/// tokenizer handle can be shared across engine instances.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given sentence into an ordered sequence of tokens.
    fn tokenize(&self, sentence: &str) -> Result<Vec<Token>>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual tokenizer modules
#[cfg(feature = "lindera")]
pub mod lindera;
pub mod unicode_word;
