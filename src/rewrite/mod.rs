//! The constrained rewriting engine and its supporting pieces.
//!
//! Data flow: text → [`segmenter`] → sentences → tokenizer → tokens →
//! [`engine`] (constraint check + candidate generation per token) →
//! [`assembler`] → rewritten sentence → joined rewritten text.

pub mod assembler;
pub mod engine;
pub mod history;
pub mod oneshot;
pub mod segmenter;
pub mod trace;
