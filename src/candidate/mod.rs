//! Candidate generation for violating tokens.
//!
//! One capability, two strategies:
//!
//! - [`generative::GenerativeGenerator`] - prompts a language model with an
//!   escalating instruction and validates the single-word reply
//! - [`lexical::LexicalGenerator`] - collects synonyms from a dictionary
//!   plus a curated table and ranks them by contextual embedding
//!   similarity
//!
//! Both implement [`CandidateGenerator`]; the rewrite engine is agnostic
//! to which one it holds.

pub mod generative;
pub mod lexical;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::constraint::BannedSet;
use crate::error::Result;
use crate::rewrite::history::FailureHistory;

/// A replacement candidate with a semantic-similarity estimate.
///
/// `score` is only meaningful for the lexical strategy (cosine similarity
/// in [0, 1]); the generative strategy reports 1.0 since validity, not
/// ranking, is its acceptance criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// The proposed replacement text.
    pub text: String,
    /// Semantic similarity estimate in [0, 1].
    pub score: f64,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new<S: Into<String>>(text: S, score: f64) -> Self {
        Candidate {
            text: text.into(),
            score,
        }
    }
}

/// Escalation level selected by the attempt index.
///
/// Early attempts preserve maximal semantic fidelity; later attempts trade
/// fidelity for constraint satisfaction once repeated failures signal a
/// hard case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyTier {
    /// Attempts 0-2: direct synonym or closest paraphrase.
    Direct,
    /// Attempts 3-5: broader or hypernym-level substitution.
    Broaden,
    /// Attempts 6+: free paraphrase preserving sentence meaning.
    Paraphrase,
}

impl StrategyTier {
    /// Select the tier for a given attempt index.
    pub fn from_attempt(attempt: usize) -> Self {
        match attempt {
            0..=2 => StrategyTier::Direct,
            3..=5 => StrategyTier::Broaden,
            _ => StrategyTier::Paraphrase,
        }
    }
}

/// Everything a generator needs to propose one replacement.
#[derive(Debug)]
pub struct CandidateRequest<'a> {
    /// The violating token to replace.
    pub token: &'a Token,
    /// The sentence containing the token.
    pub sentence: &'a str,
    /// The whole input text, when available (generative strategy only).
    pub document: Option<&'a str>,
    /// The banned character set.
    pub banned: &'a BannedSet,
    /// Candidates already rejected for this token.
    pub history: &'a FailureHistory,
    /// Zero-based attempt index; selects the strategy tier.
    pub attempt: usize,
}

impl CandidateRequest<'_> {
    /// The escalation tier for this attempt.
    pub fn tier(&self) -> StrategyTier {
        StrategyTier::from_attempt(self.attempt)
    }
}

/// Trait for candidate generation strategies.
///
/// `Ok(None)` means the attempt was non-productive (a service call failed
/// or the reply was unusable); the engine simply moves on to the next
/// attempt. Hard errors are reserved for conditions that would make every
/// subsequent attempt equally hopeless.
pub trait CandidateGenerator: Send + Sync {
    /// Propose a replacement for the request's token, or `None` when this
    /// attempt produced nothing usable.
    fn generate(&self, request: &CandidateRequest<'_>) -> Result<Option<Candidate>>;

    /// Default per-token attempt budget for this strategy.
    fn default_max_attempts(&self) -> usize;

    /// Get the name of this generator (for debugging and tracing).
    fn name(&self) -> &'static str;
}
