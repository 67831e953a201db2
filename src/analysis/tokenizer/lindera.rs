//! Reading-regime Japanese tokenizer backed by lindera.
//!
//! Produces one token per morpheme with an all-hiragana reading taken from
//! the morphological dictionary (IPADIC detail field 7), falling back to
//! the folded surface when the dictionary has no reading entry. POS is the
//! top-level pos1 field with a noun default.

use std::borrow::Cow;
use std::str::FromStr;

use lindera::dictionary::load_dictionary;
use lindera::mode::Mode;
use lindera::segmenter::Segmenter;

use crate::analysis::kana::katakana_to_hiragana;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{LipogramError, Result};

// IPADIC detail layout: pos1..pos4, conjugation type/form, base form,
// reading, pronunciation.
const DETAIL_POS1: usize = 0;
const DETAIL_READING: usize = 7;

/// A reading-aware tokenizer for Japanese text.
pub struct LinderaTokenizer {
    inner: Segmenter,
}

impl LinderaTokenizer {
    /// Create a new Lindera tokenizer.
    ///
    /// `mode_str` is lindera's segmentation mode ("normal" or "decompose");
    /// `dict_uri` selects the dictionary (e.g. "embedded://ipadic").
    pub fn new(mode_str: &str, dict_uri: &str) -> Result<Self> {
        let mode = Mode::from_str(mode_str)
            .map_err(|e| LipogramError::analysis(format!("Invalid mode '{mode_str}': {e}")))?;
        let dict = load_dictionary(dict_uri)
            .map_err(|e| LipogramError::analysis(format!("Failed to load dictionary: {e}")))?;
        let inner = Segmenter::new(mode, dict, None);

        Ok(Self { inner })
    }
}

impl Tokenizer for LinderaTokenizer {
    fn tokenize(&self, sentence: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        for mut morpheme in self
            .inner
            .segment(Cow::Borrowed(sentence))
            .map_err(|e| LipogramError::analysis(format!("Failed to segment text: {e}")))?
        {
            let surface = morpheme.surface.to_string();
            let details = morpheme.details();

            let reading = details
                .get(DETAIL_READING)
                .filter(|r| !r.is_empty() && **r != "*")
                .map(|r| katakana_to_hiragana(r))
                .unwrap_or_else(|| katakana_to_hiragana(&surface));

            let pos = details
                .get(DETAIL_POS1)
                .filter(|p| !p.is_empty() && **p != "*")
                .map(|p| p.to_string())
                .unwrap_or_else(|| "名詞".to_string());

            tokens.push(Token::new(surface, reading, pos));
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "lindera"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_japanese() {
        let tokenizer = LinderaTokenizer::new("normal", "embedded://ipadic").unwrap();
        let tokens = tokenizer.tokenize("猫が好き").unwrap();

        assert!(!tokens.is_empty());
        assert_eq!(tokens[0].surface, "猫");
        assert_eq!(tokens[0].reading, "ねこ");
    }

    #[test]
    fn test_readings_are_hiragana() {
        let tokenizer = LinderaTokenizer::new("normal", "embedded://ipadic").unwrap();
        let tokens = tokenizer.tokenize("家に帰る").unwrap();

        for token in &tokens {
            assert!(
                !token.reading.chars().any(|c| ('ァ'..='ン').contains(&c)),
                "katakana leaked into reading: {}",
                token.reading
            );
        }
    }
}
