//! Text analysis: tokens, tokenizers, readings, and part-of-speech tagging.

pub mod kana;
pub mod pos;
pub mod token;
pub mod tokenizer;
