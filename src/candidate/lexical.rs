//! Lexical-semantic candidate generation.
//!
//! Collects synonyms from a POS-filtered dictionary unioned with the
//! curated substitution table, drops anything that violates the banned set
//! or was already rejected, then ranks the survivors by cosine similarity
//! of contextual embeddings: the original sentence versus the sentence
//! with the candidate substituted in.
//!
//! When nothing survives filtering, the original word is returned with
//! score 0.0 — the engine treats that as non-acceptance and falls through
//! to its retry/fallback handling.

use std::sync::Arc;

use log::warn;

use crate::analysis::pos::PosClass;
use crate::candidate::{Candidate, CandidateGenerator, CandidateRequest};
use crate::error::Result;
use crate::generation::embedder::{Embedder, cosine_similarity};
use crate::synonym::{SynonymProvider, curated};

/// Candidate generator backed by a synonym dictionary and an embedder.
pub struct LexicalGenerator {
    provider: Arc<dyn SynonymProvider>,
    embedder: Arc<dyn Embedder>,
}

impl LexicalGenerator {
    /// Default attempt budget for the lexical path.
    pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

    /// Create a new lexical generator.
    pub fn new(provider: Arc<dyn SynonymProvider>, embedder: Arc<dyn Embedder>) -> Self {
        LexicalGenerator { provider, embedder }
    }

    /// Collect and filter candidate synonyms for a request.
    ///
    /// Dictionary synonyms (POS-filtered) unioned with curated
    /// substitutions, minus the original word, banned-set violators, and
    /// previously rejected candidates. Deduplication is case-insensitive.
    fn collect_candidates(&self, request: &CandidateRequest<'_>) -> Result<Vec<String>> {
        let word = &request.token.surface;
        let pos = PosClass::from_tag(&request.token.pos);

        let mut pool = self.provider.synonyms(word, pos)?;
        pool.extend(curated::substitutions(word));

        let original_folded = word.to_lowercase();
        let mut seen: Vec<String> = Vec::new();
        let mut candidates = Vec::new();
        for candidate in pool {
            let folded = candidate.to_lowercase();
            if folded == original_folded || seen.contains(&folded) {
                continue;
            }
            seen.push(folded.clone());

            if request.banned.contains_banned(&folded) {
                continue;
            }
            if request.history.contains(&candidate) {
                continue;
            }
            candidates.push(candidate);
        }

        Ok(candidates)
    }
}

impl CandidateGenerator for LexicalGenerator {
    fn generate(&self, request: &CandidateRequest<'_>) -> Result<Option<Candidate>> {
        let original = &request.token.surface;
        let candidates = self.collect_candidates(request)?;

        if candidates.is_empty() {
            // Nothing survived filtering; score 0.0 signals non-acceptance.
            return Ok(Some(Candidate::new(original.clone(), 0.0)));
        }

        let original_embedding = match self.embedder.embed(request.sentence) {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!("embedding of original context failed: {e}");
                return Ok(None);
            }
        };

        let mut best = Candidate::new(original.clone(), 0.0);
        for candidate in candidates {
            let substituted = request.sentence.replacen(original.as_str(), &candidate, 1);
            let candidate_embedding = match self.embedder.embed(&substituted) {
                Ok(embedding) => embedding,
                Err(e) => {
                    warn!("embedding of candidate '{candidate}' failed: {e}");
                    continue;
                }
            };

            let similarity = cosine_similarity(&original_embedding, &candidate_embedding) as f64;
            if similarity > best.score {
                best = Candidate::new(candidate, similarity);
            }
        }

        Ok(Some(best))
    }

    fn default_max_attempts(&self) -> usize {
        Self::DEFAULT_MAX_ATTEMPTS
    }

    fn name(&self) -> &'static str {
        "lexical"
    }
}
