//! Sentence reassembly from resolved tokens.
//!
//! Two modes, matching the two constraint regimes:
//!
//! - Reading regime (Japanese): tokenization is exhaustive, so the output
//!   is the direct concatenation of resolved surfaces with nothing added.
//! - Surface regime (English): word tokens exclude punctuation and
//!   spacing, so replacements are spliced back into the original sentence
//!   positionally. When token and replacement counts diverge the assembler
//!   degrades to a whitespace join.

use crate::analysis::token::Token;

/// Concatenate resolved surfaces with no separators (reading regime).
pub fn concat_surfaces(surfaces: &[String]) -> String {
    surfaces.concat()
}

/// Splice replacements into the original sentence (surface regime).
///
/// When `tokens` and `replacements` align one-to-one, each changed token
/// is located in the original sentence (case-insensitive, left to right in
/// reverse splice order to keep byte positions valid) and substituted in
/// place, preserving all spacing and punctuation. On count mismatch the
/// replacements are joined with single spaces.
pub fn reconstruct_sentence(
    original: &str,
    tokens: &[Token],
    replacements: &[String],
) -> String {
    if tokens.len() != replacements.len() {
        return replacements.join(" ");
    }

    let mut result = original.to_string();
    for (token, replacement) in tokens.iter().zip(replacements.iter()).rev() {
        if token.surface == *replacement {
            continue;
        }

        let haystack = result.to_lowercase();
        let needle = token.surface.to_lowercase();
        if let Some(start) = haystack.find(&needle) {
            let end = start + needle.len();
            // Case folding can shift byte offsets for exotic scripts;
            // splice only when the located range is valid in the original.
            if end <= result.len()
                && result.is_char_boundary(start)
                && result.is_char_boundary(end)
            {
                result.replace_range(start..end, replacement);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens_of(words: &[&str]) -> Vec<Token> {
        words
            .iter()
            .map(|w| Token::surface_only(*w, "NOUN"))
            .collect()
    }

    #[test]
    fn test_concat_surfaces() {
        let surfaces = vec!["猫".to_string(), "が".to_string(), "いる".to_string()];
        assert_eq!(concat_surfaces(&surfaces), "猫がいる");
    }

    #[test]
    fn test_reconstruct_unchanged() {
        let tokens = tokens_of(&["The", "cat", "sat"]);
        let replacements: Vec<String> =
            tokens.iter().map(|t| t.surface.clone()).collect();
        assert_eq!(
            reconstruct_sentence("The cat sat.", &tokens, &replacements),
            "The cat sat."
        );
    }

    #[test]
    fn test_reconstruct_with_replacement() {
        let tokens = tokens_of(&["The", "cat", "sat"]);
        let replacements = vec!["A".to_string(), "cat".to_string(), "sat".to_string()];
        assert_eq!(
            reconstruct_sentence("The cat sat.", &tokens, &replacements),
            "A cat sat."
        );
    }

    #[test]
    fn test_reconstruct_preserves_punctuation() {
        let tokens = tokens_of(&["wait", "what"]);
        let replacements = vec!["stop".to_string(), "what".to_string()];
        assert_eq!(
            reconstruct_sentence("wait, what?!", &tokens, &replacements),
            "stop, what?!"
        );
    }

    #[test]
    fn test_reconstruct_case_insensitive_find() {
        let tokens = tokens_of(&["The", "mat"]);
        let replacements = vec!["That".to_string(), "rug".to_string()];
        assert_eq!(
            reconstruct_sentence("THE mat.", &tokens, &replacements),
            "That rug."
        );
    }

    #[test]
    fn test_count_mismatch_falls_back_to_join() {
        let tokens = tokens_of(&["a", "b"]);
        let replacements = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        assert_eq!(
            reconstruct_sentence("a b.", &tokens, &replacements),
            "x y z"
        );
    }
}
