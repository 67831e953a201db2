//! Failure memory for a single token's resolution attempts.
//!
//! While one violating token is being rewritten, every rejected candidate
//! is recorded here so the generator can be told to avoid them and so a
//! repeated candidate is skipped without a redundant validity check. The
//! history is scoped to one token: the engine creates a fresh one per
//! violating token and discards it once the token resolves.

use ahash::AHashSet;

/// Ordered, deduplicated set of rejected candidate strings.
///
/// Insertion order is preserved (it feeds the "already tried" section of
/// generation prompts); membership checks are case-insensitive so "Feline"
/// and "feline" count as the same failed attempt.
#[derive(Debug, Default, Clone)]
pub struct FailureHistory {
    ordered: Vec<String>,
    seen: AHashSet<String>,
}

impl FailureHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rejected candidate. Returns `true` if it was new.
    pub fn insert<S: Into<String>>(&mut self, candidate: S) -> bool {
        let candidate = candidate.into();
        let folded = candidate.to_lowercase();
        if self.seen.contains(&folded) {
            return false;
        }
        self.seen.insert(folded);
        self.ordered.push(candidate);
        true
    }

    /// Check whether a candidate has already been rejected.
    pub fn contains(&self, candidate: &str) -> bool {
        self.seen.contains(&candidate.to_lowercase())
    }

    /// Number of distinct rejected candidates.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Check if no candidate has been rejected yet.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Iterate over rejected candidates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut history = FailureHistory::new();
        assert!(history.insert("feline"));
        assert!(history.contains("feline"));
        assert!(!history.contains("kitty"));
    }

    #[test]
    fn test_dedup() {
        let mut history = FailureHistory::new();
        assert!(history.insert("feline"));
        assert!(!history.insert("feline"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_case_insensitive_membership() {
        let mut history = FailureHistory::new();
        history.insert("Feline");
        assert!(history.contains("feline"));
        assert!(!history.insert("FELINE"));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut history = FailureHistory::new();
        history.insert("b");
        history.insert("a");
        history.insert("c");
        let order: Vec<_> = history.iter().collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_monotonic_growth() {
        let mut history = FailureHistory::new();
        let mut last_len = 0;
        for candidate in ["x", "y", "x", "z", "y"] {
            history.insert(candidate);
            assert!(history.len() >= last_len);
            last_len = history.len();
        }
        assert_eq!(history.len(), 3);
    }
}
