//! Kana normalization for phonetic readings.
//!
//! Reading-regime constraint checks compare against a single kana script.
//! Morphological dictionaries report readings in katakana, so readings are
//! folded to hiragana before any banned-character comparison.

/// Convert katakana characters to hiragana.
///
/// Characters in the katakana block (ァ..ン) are shifted down by 0x60 to
/// their hiragana equivalents; everything else passes through unchanged,
/// including the prolonged sound mark and non-kana characters.
///
/// # Examples
///
/// ```
/// use lipogram::analysis::kana::katakana_to_hiragana;
///
/// assert_eq!(katakana_to_hiragana("ネコ"), "ねこ");
/// assert_eq!(katakana_to_hiragana("カタカナmixed漢字"), "かたかなmixed漢字");
/// ```
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| {
            if ('ァ'..='ン').contains(&c) {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_katakana_folded() {
        assert_eq!(katakana_to_hiragana("カタカナ"), "かたかな");
        assert_eq!(katakana_to_hiragana("ネコ"), "ねこ");
    }

    #[test]
    fn test_hiragana_unchanged() {
        assert_eq!(katakana_to_hiragana("ひらがな"), "ひらがな");
    }

    #[test]
    fn test_mixed_scripts() {
        assert_eq!(katakana_to_hiragana("家はイエ"), "家はいえ");
        assert_eq!(katakana_to_hiragana("ABCアイウ123"), "ABCあいう123");
    }

    #[test]
    fn test_prolonged_mark_kept() {
        // ー is outside the ァ..ン range and must pass through.
        assert_eq!(katakana_to_hiragana("コーヒー"), "こーひー");
    }

    #[test]
    fn test_empty() {
        assert_eq!(katakana_to_hiragana(""), "");
    }
}
