//! The per-token constrained rewriting engine.
//!
//! For every token of every sentence the engine runs an explicit state
//! machine:
//!
//! ```text
//! CHECK ──clean──────────────────────────────▶ CLEAN
//!   │ violation
//!   ▼
//! GENERATE ──candidate──▶ VALIDATE ──pass──▶ ACCEPT
//!   ▲    │                    │ fail (history grows)
//!   │    └──budget spent──▶ FALLBACK
//!   └──────────reject─────────┘
//! ```
//!
//! The loop is bounded by the attempt counter, never recursive, so the
//! retry budget stays auditable. Exhausting the budget is not an error:
//! the original surface is emitted unchanged (silent best-effort) and the
//! outcome is recorded as unresolved for observability.

use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::analysis::kana::katakana_to_hiragana;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::Tokenizer;
use crate::candidate::{Candidate, CandidateGenerator, CandidateRequest};
use crate::constraint::{BannedSet, Regime};
use crate::error::Result;
use crate::rewrite::assembler;
use crate::rewrite::history::FailureHistory;
use crate::rewrite::segmenter::SentenceSegmenter;
use crate::rewrite::trace::{NullTrace, TraceSink};

/// Tunable knobs for a rewrite run.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Which representation the constraint applies to.
    pub regime: Regime,
    /// Per-token generation-call budget; `None` uses the strategy default
    /// (5 generative, 3 lexical).
    pub max_attempts: Option<usize>,
    /// Minimum candidate score for acceptance. Generative candidates carry
    /// score 1.0 and always clear it; lexical candidates must rank at or
    /// above this cosine similarity.
    pub similarity_threshold: f64,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            regime: Regime::Surface,
            max_attempts: None,
            similarity_threshold: 0.5,
        }
    }
}

/// How a single token was resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenOutcome {
    /// The token never violated the constraint.
    Clean { surface: String },
    /// The token was replaced by an accepted candidate.
    Replaced {
        original: String,
        replacement: String,
        score: f64,
        attempts: usize,
    },
    /// The retry budget ran out; the original surface was emitted even
    /// though it still violates the constraint.
    Unresolved { surface: String, attempts: usize },
}

/// Result of a rewrite run with per-token telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteReport {
    /// The rewritten text.
    pub text: String,
    /// Per-token outcomes in processing order.
    pub outcomes: Vec<TokenOutcome>,
}

impl RewriteReport {
    /// Number of tokens replaced.
    pub fn replaced_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, TokenOutcome::Replaced { .. }))
            .count()
    }

    /// Number of tokens left unresolved after exhausting retries.
    pub fn unresolved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, TokenOutcome::Unresolved { .. }))
            .count()
    }
}

/// Explicit per-token state machine states.
enum TokenState {
    Check,
    Generate { attempt: usize },
    Validate { candidate: Candidate, attempt: usize },
    Accept { candidate: Candidate, reading: String, attempts: usize },
    Fallback { attempts: usize },
    Clean,
}

/// The context-aware sequential rewrite engine.
///
/// Single-threaded and blocking: each token is resolved fully, including
/// all of its generation calls, before the next token begins. The only
/// shared state across tokens is the immutable banned set and the
/// read-only collaborator handles.
pub struct RewriteEngine {
    tokenizer: Arc<dyn Tokenizer>,
    generator: Arc<dyn CandidateGenerator>,
    options: RewriteOptions,
    trace: Arc<dyn TraceSink>,
    segmenter: SentenceSegmenter,
}

impl RewriteEngine {
    /// Create an engine with default options and no trace output.
    pub fn new(tokenizer: Arc<dyn Tokenizer>, generator: Arc<dyn CandidateGenerator>) -> Self {
        RewriteEngine {
            tokenizer,
            generator,
            options: RewriteOptions::default(),
            trace: Arc::new(NullTrace),
            segmenter: SentenceSegmenter::new(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: RewriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach a trace sink for per-token diagnostics.
    pub fn with_trace(mut self, trace: Arc<dyn TraceSink>) -> Self {
        self.trace = trace;
        self
    }

    /// Replace the sentence segmenter.
    pub fn with_segmenter(mut self, segmenter: SentenceSegmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Rewrite `text` so no token violates `banned`, best-effort.
    pub fn rewrite(&self, text: &str, banned: &BannedSet) -> Result<String> {
        Ok(self.rewrite_with_report(text, banned)?.text)
    }

    /// Rewrite `text` and return per-token outcomes alongside the result.
    pub fn rewrite_with_report(&self, text: &str, banned: &BannedSet) -> Result<RewriteReport> {
        let mut outcomes = Vec::new();
        let mut rewritten = String::new();

        for (index, sentence) in self.segmenter.segment(text).iter().enumerate() {
            self.trace.sentence_start(index, sentence);
            let result = self.rewrite_sentence_inner(sentence, text, banned, &mut outcomes)?;
            self.trace.sentence_done(index, &result);
            rewritten.push_str(&result);
        }

        Ok(RewriteReport {
            text: rewritten,
            outcomes,
        })
    }

    /// Rewrite a single sentence without document-level context.
    pub fn rewrite_sentence(&self, sentence: &str, banned: &BannedSet) -> Result<String> {
        let mut outcomes = Vec::new();
        self.rewrite_sentence_inner(sentence, sentence, banned, &mut outcomes)
    }

    fn rewrite_sentence_inner(
        &self,
        sentence: &str,
        document: &str,
        banned: &BannedSet,
        outcomes: &mut Vec<TokenOutcome>,
    ) -> Result<String> {
        let tokens = self.tokenizer.tokenize(sentence)?;
        let mut replacements = Vec::with_capacity(tokens.len());

        for token in &tokens {
            let (surface, outcome) = self.resolve_token(token, sentence, document, banned)?;
            replacements.push(surface);
            outcomes.push(outcome);
        }

        let assembled = match self.options.regime {
            Regime::Reading => assembler::concat_surfaces(&replacements),
            Regime::Surface => assembler::reconstruct_sentence(sentence, &tokens, &replacements),
        };
        Ok(assembled)
    }

    /// Resolve one token through the CHECK/GENERATE/VALIDATE state machine.
    fn resolve_token(
        &self,
        token: &Token,
        sentence: &str,
        document: &str,
        banned: &BannedSet,
    ) -> Result<(String, TokenOutcome)> {
        let max_attempts = self
            .options
            .max_attempts
            .unwrap_or_else(|| self.generator.default_max_attempts());

        let mut history = FailureHistory::new();
        let mut state = TokenState::Check;

        loop {
            state = match state {
                TokenState::Check => {
                    if banned.token_violates(token, self.options.regime) {
                        let found = banned.banned_in(&token.surface);
                        let found = if found.is_empty() {
                            banned.banned_in(&token.reading)
                        } else {
                            found
                        };
                        self.trace.token_violation(token, &found);
                        TokenState::Generate { attempt: 0 }
                    } else {
                        TokenState::Clean
                    }
                }

                TokenState::Generate { attempt } => {
                    if attempt >= max_attempts {
                        TokenState::Fallback { attempts: attempt }
                    } else {
                        self.trace.attempt(token, attempt);
                        let request = CandidateRequest {
                            token,
                            sentence,
                            document: Some(document),
                            banned,
                            history: &history,
                            attempt,
                        };
                        match self.generator.generate(&request)? {
                            Some(candidate) => TokenState::Validate {
                                candidate,
                                attempt: attempt + 1,
                            },
                            // Non-productive attempt; the call still
                            // consumed budget.
                            None => TokenState::Generate {
                                attempt: attempt + 1,
                            },
                        }
                    }
                }

                TokenState::Validate { candidate, attempt } => {
                    let is_original =
                        candidate.text.to_lowercase() == token.surface.to_lowercase();
                    if is_original || history.contains(&candidate.text) {
                        // Non-candidate: skipped without a redundant
                        // validity check.
                        TokenState::Generate { attempt }
                    } else {
                        let reading = self.derive_reading(&candidate.text);
                        if self.candidate_passes(&candidate, &reading, banned) {
                            TokenState::Accept {
                                candidate,
                                reading,
                                attempts: attempt,
                            }
                        } else {
                            self.trace.rejected(token, &candidate.text);
                            history.insert(candidate.text);
                            TokenState::Generate { attempt }
                        }
                    }
                }

                TokenState::Accept {
                    candidate,
                    reading,
                    attempts,
                } => {
                    self.trace.accepted(token, &candidate, &reading);
                    let outcome = TokenOutcome::Replaced {
                        original: token.surface.clone(),
                        replacement: candidate.text.clone(),
                        score: candidate.score,
                        attempts,
                    };
                    return Ok((candidate.text, outcome));
                }

                TokenState::Fallback { attempts } => {
                    // Silent best-effort: the original surface goes out
                    // even though it still violates the constraint.
                    self.trace.fallback(token, attempts);
                    warn!(
                        "token '{}' left unresolved after {} attempts",
                        token.surface, attempts
                    );
                    let outcome = TokenOutcome::Unresolved {
                        surface: token.surface.clone(),
                        attempts,
                    };
                    return Ok((token.surface.clone(), outcome));
                }

                TokenState::Clean => {
                    self.trace.token_kept(token);
                    let outcome = TokenOutcome::Clean {
                        surface: token.surface.clone(),
                    };
                    return Ok((token.surface.clone(), outcome));
                }
            };
        }
    }

    /// Derive the phonetic reading of a candidate.
    ///
    /// Reading regime re-tokenizes the candidate and concatenates the
    /// morpheme readings; if tokenization yields nothing usable the folded
    /// surface stands in. Surface regime lowercases.
    fn derive_reading(&self, text: &str) -> String {
        match self.options.regime {
            Regime::Surface => text.to_lowercase(),
            Regime::Reading => match self.tokenizer.tokenize(text) {
                Ok(tokens) if !tokens.is_empty() => {
                    tokens.iter().map(|t| t.reading.as_str()).collect()
                }
                _ => katakana_to_hiragana(text),
            },
        }
    }

    /// Check a candidate's surface, reading, and score.
    fn candidate_passes(&self, candidate: &Candidate, reading: &str, banned: &BannedSet) -> bool {
        let constraint_ok = match self.options.regime {
            Regime::Reading => {
                !banned.contains_banned(&candidate.text) && !banned.contains_banned(reading)
            }
            Regime::Surface => !banned.contains_banned(reading),
        };
        constraint_ok && candidate.score >= self.options.similarity_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;

    /// Generator that replays a fixed sequence of candidates per surface
    /// and counts generation calls.
    struct ScriptedGenerator {
        scripts: HashMap<&'static str, Vec<&'static str>>,
        calls: AtomicUsize,
        cursor: Mutex<HashMap<String, usize>>,
    }

    impl ScriptedGenerator {
        fn new(scripts: HashMap<&'static str, Vec<&'static str>>) -> Self {
            ScriptedGenerator {
                scripts,
                calls: AtomicUsize::new(0),
                cursor: Mutex::new(HashMap::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CandidateGenerator for ScriptedGenerator {
        fn generate(&self, request: &CandidateRequest<'_>) -> Result<Option<Candidate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let surface = request.token.surface.as_str();
            let Some(script) = self.scripts.get(surface) else {
                return Ok(None);
            };
            let mut cursor = self.cursor.lock().unwrap();
            let position = cursor.entry(surface.to_string()).or_insert(0);
            let reply = script.get(*position).or_else(|| script.last());
            *position += 1;
            Ok(reply.map(|text| Candidate::new(*text, 1.0)))
        }

        fn default_max_attempts(&self) -> usize {
            5
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    /// Trace sink that records rejected candidates.
    #[derive(Default)]
    struct RecordingTrace {
        rejected: Mutex<Vec<String>>,
    }

    impl TraceSink for RecordingTrace {
        fn rejected(&self, _token: &Token, candidate: &str) {
            self.rejected.lock().unwrap().push(candidate.to_string());
        }
    }

    /// Fixed-vocabulary reading-regime tokenizer for Japanese tests.
    struct KanaTokenizer {
        entries: HashMap<&'static str, Vec<(&'static str, &'static str, &'static str)>>,
    }

    impl Tokenizer for KanaTokenizer {
        fn tokenize(&self, sentence: &str) -> Result<Vec<Token>> {
            match self.entries.get(sentence) {
                Some(tokens) => Ok(tokens
                    .iter()
                    .map(|(s, r, p)| Token::new(*s, *r, *p))
                    .collect()),
                None => Ok(vec![Token::new(
                    sentence,
                    katakana_to_hiragana(sentence),
                    "名詞",
                )]),
            }
        }

        fn name(&self) -> &'static str {
            "kana_fixture"
        }
    }

    fn engine_with(
        scripts: HashMap<&'static str, Vec<&'static str>>,
    ) -> (RewriteEngine, Arc<ScriptedGenerator>) {
        let generator = Arc::new(ScriptedGenerator::new(scripts));
        let engine = RewriteEngine::new(
            Arc::new(UnicodeWordTokenizer::new()),
            generator.clone() as Arc<dyn CandidateGenerator>,
        );
        (engine, generator)
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        let (engine, generator) = engine_with(HashMap::new());
        let banned = BannedSet::case_insensitive(['z']).unwrap();

        let text = "The cat sat on the mat.";
        let result = engine.rewrite(text, &banned).unwrap();

        assert_eq!(result, text);
        assert_eq!(generator.call_count(), 0);
    }

    #[test]
    fn test_banned_e_scenario() {
        let mut scripts = HashMap::new();
        scripts.insert("The", vec!["A"]);
        scripts.insert("the", vec!["a"]);
        let (engine, _) = engine_with(scripts);
        let banned = BannedSet::case_insensitive(['e']).unwrap();

        let report = engine
            .rewrite_with_report("The cat sat on the mat.", &banned)
            .unwrap();

        assert!(banned.validate(&report.text.to_lowercase()).is_empty());
        assert!(report.text.contains("cat sat on"));
        assert!(report.text.ends_with('.'));
        assert_eq!(report.replaced_count(), 2);
        assert_eq!(report.unresolved_count(), 0);
    }

    #[test]
    fn test_fallback_bound() {
        // Every proposal still contains the banned character.
        let mut scripts = HashMap::new();
        scripts.insert("bee", vec!["eel", "eke", "fee", "gee", "hem"]);
        let (engine, generator) = engine_with(scripts);
        let engine = engine.with_options(RewriteOptions {
            max_attempts: Some(3),
            ..Default::default()
        });
        let banned = BannedSet::case_insensitive(['e']).unwrap();

        let report = engine.rewrite_with_report("bee", &banned).unwrap();

        assert_eq!(report.text, "bee");
        assert_eq!(generator.call_count(), 3);
        assert_eq!(report.unresolved_count(), 1);
        match &report.outcomes[0] {
            TokenOutcome::Unresolved { surface, attempts } => {
                assert_eq!(surface, "bee");
                assert_eq!(*attempts, 3);
            }
            other => panic!("expected unresolved outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_candidate_not_revalidated() {
        // The generator keeps proposing the same bad candidate; only the
        // first occurrence may be rejected (and thus validated).
        let mut scripts = HashMap::new();
        scripts.insert("bee", vec!["eel", "eel", "eel"]);
        let generator = Arc::new(ScriptedGenerator::new(scripts));
        let trace = Arc::new(RecordingTrace::default());
        let engine = RewriteEngine::new(
            Arc::new(UnicodeWordTokenizer::new()),
            generator.clone() as Arc<dyn CandidateGenerator>,
        )
        .with_options(RewriteOptions {
            max_attempts: Some(3),
            ..Default::default()
        })
        .with_trace(trace.clone() as Arc<dyn TraceSink>);
        let banned = BannedSet::case_insensitive(['e']).unwrap();

        let result = engine.rewrite("bee", &banned).unwrap();
        assert_eq!(result, "bee");
        assert_eq!(generator.call_count(), 3);

        let rejected = trace.rejected.lock().unwrap();
        assert_eq!(rejected.as_slice(), ["eel"]);
    }

    #[test]
    fn test_history_never_contains_accepted() {
        let mut scripts = HashMap::new();
        scripts.insert("bee", vec!["eel", "eke", "ant"]);
        let generator = Arc::new(ScriptedGenerator::new(scripts));
        let trace = Arc::new(RecordingTrace::default());
        let engine = RewriteEngine::new(
            Arc::new(UnicodeWordTokenizer::new()),
            generator.clone() as Arc<dyn CandidateGenerator>,
        )
        .with_trace(trace.clone() as Arc<dyn TraceSink>);
        let banned = BannedSet::case_insensitive(['e']).unwrap();

        let report = engine.rewrite_with_report("bee", &banned).unwrap();
        assert_eq!(report.text, "ant");

        let rejected = trace.rejected.lock().unwrap();
        assert_eq!(rejected.as_slice(), ["eel", "eke"]);
        assert!(!rejected.contains(&"ant".to_string()));
    }

    #[test]
    fn test_reading_regime_surface_clean_reading_violates() {
        let mut entries = HashMap::new();
        entries.insert("家だ。", vec![("家", "いえ", "名詞"), ("だ", "だ", "助動詞"), ("。", "。", "記号")]);
        entries.insert("うち", vec![("うち", "うち", "名詞")]);
        let tokenizer = Arc::new(KanaTokenizer { entries });

        let mut scripts = HashMap::new();
        scripts.insert("家", vec!["うち"]);
        let generator = Arc::new(ScriptedGenerator::new(scripts));

        let engine = RewriteEngine::new(tokenizer, generator as Arc<dyn CandidateGenerator>)
            .with_options(RewriteOptions {
                regime: Regime::Reading,
                ..Default::default()
            });
        // Banned reading character never appears in the surface "家".
        let banned = BannedSet::new(['い']).unwrap();

        let result = engine.rewrite("家だ。", &banned).unwrap();
        assert_eq!(result, "うちだ。");
    }

    #[test]
    fn test_similarity_threshold_rejects_low_scores() {
        /// Generator returning a fixed low-score candidate.
        struct LowScore;
        impl CandidateGenerator for LowScore {
            fn generate(&self, _request: &CandidateRequest<'_>) -> Result<Option<Candidate>> {
                Ok(Some(Candidate::new("ant", 0.2)))
            }
            fn default_max_attempts(&self) -> usize {
                3
            }
            fn name(&self) -> &'static str {
                "low_score"
            }
        }

        let engine = RewriteEngine::new(
            Arc::new(UnicodeWordTokenizer::new()),
            Arc::new(LowScore) as Arc<dyn CandidateGenerator>,
        );
        let banned = BannedSet::case_insensitive(['e']).unwrap();

        // "ant" is constraint-clean but scores under the 0.5 threshold.
        let report = engine.rewrite_with_report("bee", &banned).unwrap();
        assert_eq!(report.text, "bee");
        assert_eq!(report.unresolved_count(), 1);
    }

    #[test]
    fn test_non_productive_attempts_consume_budget() {
        /// Generator that never produces anything.
        struct Silent {
            calls: AtomicUsize,
        }
        impl CandidateGenerator for Silent {
            fn generate(&self, _request: &CandidateRequest<'_>) -> Result<Option<Candidate>> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            }
            fn default_max_attempts(&self) -> usize {
                4
            }
            fn name(&self) -> &'static str {
                "silent"
            }
        }

        let generator = Arc::new(Silent {
            calls: AtomicUsize::new(0),
        });
        let engine = RewriteEngine::new(
            Arc::new(UnicodeWordTokenizer::new()),
            generator.clone() as Arc<dyn CandidateGenerator>,
        );
        let banned = BannedSet::case_insensitive(['e']).unwrap();

        let result = engine.rewrite("bee", &banned).unwrap();
        assert_eq!(result, "bee");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 4);
    }
}
