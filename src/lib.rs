//! # Lipogram
//!
//! A constrained text rewriting library for Rust.
//!
//! Rewrites natural-language text so that no token's surface form or
//! phonetic reading contains any character from a caller-supplied banned
//! set, while staying as close as possible to the original meaning.
//!
//! ## Features
//!
//! - Surface-letter and phonetic-reading constraint regimes
//! - Per-token rewrite loop with failure memory and escalating strategies
//! - Two candidate generation strategies: model-prompted and
//!   synonym-dictionary + embedding-ranked
//! - Pluggable tokenizers, chat clients, embedders, and synonym providers
//! - Silent best-effort fallback: a token that cannot be resolved is
//!   emitted unchanged, never turned into an error

pub mod analysis;
pub mod candidate;
pub mod cli;
pub mod config;
pub mod constraint;
pub mod error;
pub mod generation;
pub mod metrics;
pub mod rewrite;
pub mod synonym;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
