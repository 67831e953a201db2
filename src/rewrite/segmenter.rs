//! Sentence segmentation.
//!
//! Splits input text on sentence-final punctuation, keeping the terminator
//! with its sentence. Nothing is trimmed or dropped: joining the segments
//! with an empty separator reproduces the input byte-for-byte, which is
//! what lets the assembler preserve inter-sentence whitespace.

/// Japanese sentence terminators.
pub const JAPANESE_TERMINATORS: &[char] = &['。', '！', '？'];

/// Latin-script sentence terminators.
pub const LATIN_TERMINATORS: &[char] = &['.', '!', '?'];

/// Splits text into sentences on sentence-final punctuation.
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    terminators: Vec<char>,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSegmenter {
    /// Create a segmenter that understands both Japanese and Latin
    /// sentence-final punctuation.
    pub fn new() -> Self {
        let mut terminators = Vec::new();
        terminators.extend_from_slice(JAPANESE_TERMINATORS);
        terminators.extend_from_slice(LATIN_TERMINATORS);
        SentenceSegmenter { terminators }
    }

    /// Create a segmenter with a custom terminator set.
    pub fn with_terminators(terminators: Vec<char>) -> Self {
        SentenceSegmenter { terminators }
    }

    /// Split `text` into sentences, each retaining its terminator.
    ///
    /// A trailing unpunctuated remainder is kept as its own segment when
    /// non-empty. The segments concatenate back to exactly `text`.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut current = String::new();

        for c in text.chars() {
            current.push(c);
            if self.terminators.contains(&c) {
                sentences.push(std::mem::take(&mut current));
            }
        }

        if !current.is_empty() {
            sentences.push(current);
        }

        sentences
    }
}
