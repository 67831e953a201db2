//! Human-readable per-token trace output.
//!
//! The engine reports every decision (kept / rejected / accepted /
//! fallback) to a [`TraceSink`]. CLIs and UIs plug a writer in for
//! diagnostics; the default [`NullTrace`] discards everything. A sink is
//! observability only — its absence must not change rewrite outcomes, so
//! write failures are swallowed.

use std::io::Write;
use std::sync::Mutex;

use crate::analysis::token::Token;
use crate::candidate::Candidate;

/// Sink for per-token rewrite decisions.
pub trait TraceSink: Send + Sync {
    /// A sentence is about to be processed.
    fn sentence_start(&self, index: usize, sentence: &str) {
        let _ = (index, sentence);
    }

    /// A sentence finished; `rewritten` is its final form.
    fn sentence_done(&self, index: usize, rewritten: &str) {
        let _ = (index, rewritten);
    }

    /// A token passed the constraint check unchanged.
    fn token_kept(&self, token: &Token) {
        let _ = token;
    }

    /// A token violates the constraint and enters the rewrite loop.
    fn token_violation(&self, token: &Token, banned_found: &[char]) {
        let _ = (token, banned_found);
    }

    /// A generation attempt is starting.
    fn attempt(&self, token: &Token, attempt: usize) {
        let _ = (token, attempt);
    }

    /// A candidate was rejected and recorded in the failure history.
    fn rejected(&self, token: &Token, candidate: &str) {
        let _ = (token, candidate);
    }

    /// A candidate was accepted as the replacement.
    fn accepted(&self, token: &Token, candidate: &Candidate, reading: &str) {
        let _ = (token, candidate, reading);
    }

    /// The retry budget ran out; the original surface is emitted as-is.
    fn fallback(&self, token: &Token, attempts: usize) {
        let _ = (token, attempts);
    }
}

/// Trace sink that discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTrace;

impl TraceSink for NullTrace {}

/// Trace sink that writes human-readable lines to any writer.
pub struct WriteTrace<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriteTrace<W> {
    /// Create a trace sink over a writer.
    pub fn new(writer: W) -> Self {
        WriteTrace {
            writer: Mutex::new(writer),
        }
    }

    fn line(&self, message: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            // Trace output is best-effort.
            let _ = writeln!(writer, "{message}");
        }
    }
}

impl<W: Write + Send> TraceSink for WriteTrace<W> {
    fn sentence_start(&self, index: usize, sentence: &str) {
        self.line(&format!("sentence {}: {sentence}", index + 1));
    }

    fn sentence_done(&self, index: usize, rewritten: &str) {
        self.line(&format!("sentence {} result: {rewritten}", index + 1));
    }

    fn token_kept(&self, token: &Token) {
        self.line(&format!("  keep      {} ({})", token.surface, token.reading));
    }

    fn token_violation(&self, token: &Token, banned_found: &[char]) {
        let found: String = banned_found.iter().collect();
        self.line(&format!(
            "  violation {} ({}) banned: {found}",
            token.surface, token.reading
        ));
    }

    fn attempt(&self, token: &Token, attempt: usize) {
        self.line(&format!("  attempt {} for {}", attempt + 1, token.surface));
    }

    fn rejected(&self, token: &Token, candidate: &str) {
        self.line(&format!("  reject    {} -> {candidate}", token.surface));
    }

    fn accepted(&self, token: &Token, candidate: &Candidate, reading: &str) {
        self.line(&format!(
            "  accept    {} -> {} ({reading}, score {:.3})",
            token.surface, candidate.text, candidate.score
        ));
    }

    fn fallback(&self, token: &Token, attempts: usize) {
        self.line(&format!(
            "  fallback  {} left unresolved after {attempts} attempts",
            token.surface
        ));
    }
}
