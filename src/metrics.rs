//! Post-hoc evaluation metrics for rewrites.
//!
//! The engine is best-effort by design: a fallback token may still violate
//! the constraint. These metrics are how callers observe that, plus how
//! much of the vocabulary a rewrite touched. No network calls here; only
//! the local tokenizer is consulted.
//!
//! - Constraint check: banned characters found in the final text (surface)
//!   or in its concatenated token readings (reading regime)
//! - VRR (vocabulary replacement rate): replaced tokens / total tokens,
//!   positional when token counts match, LCS-based otherwise
//! - TTR (type-token ratio): unique surfaces / total surfaces

use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::analysis::tokenizer::Tokenizer;
use crate::constraint::{BannedSet, Regime};
use crate::error::Result;

/// Result of checking a final text against the banned set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintCheck {
    /// Whether any banned character was found.
    pub violated: bool,
    /// The banned characters actually found (unique, order preserved).
    pub found: Vec<char>,
    /// Total occurrences of banned characters.
    pub count: usize,
    /// Which regime the check ran under.
    pub regime: Regime,
}

/// Evaluation summary for one rewrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteMetrics {
    /// Constraint check over the rewritten text.
    pub constraint: ConstraintCheck,
    /// Vocabulary replacement rate in [0, 1].
    pub vrr: f64,
    /// Type-token ratio of the rewritten text in [0, 1].
    pub ttr: f64,
}

/// Metrics evaluator bound to a tokenizer.
pub struct MetricsEvaluator {
    tokenizer: Arc<dyn Tokenizer>,
    regime: Regime,
}

impl MetricsEvaluator {
    /// Create a new evaluator.
    pub fn new(tokenizer: Arc<dyn Tokenizer>, regime: Regime) -> Self {
        MetricsEvaluator { tokenizer, regime }
    }

    /// Evaluate a rewrite end to end.
    pub fn evaluate(
        &self,
        original: &str,
        rewritten: &str,
        banned: &BannedSet,
    ) -> Result<RewriteMetrics> {
        Ok(RewriteMetrics {
            constraint: self.check_constraint(rewritten, banned)?,
            vrr: self.vocabulary_replacement_rate(original, rewritten)?,
            ttr: self.type_token_ratio(rewritten)?,
        })
    }

    /// Check a text against the banned set.
    ///
    /// Reading regime checks the concatenated per-token readings; surface
    /// regime checks the lowercased text directly.
    pub fn check_constraint(&self, text: &str, banned: &BannedSet) -> Result<ConstraintCheck> {
        let basis = match self.regime {
            Regime::Reading => {
                let tokens = self.tokenizer.tokenize(text)?;
                tokens
                    .iter()
                    .map(|t| t.reading.as_str())
                    .collect::<String>()
            }
            Regime::Surface => text.to_lowercase(),
        };

        let mut found = Vec::new();
        let mut count = 0;
        for c in basis.chars() {
            if banned.contains_banned(&c.to_string()) {
                count += 1;
                if !found.contains(&c) {
                    found.push(c);
                }
            }
        }

        Ok(ConstraintCheck {
            violated: count > 0,
            found,
            count,
            regime: self.regime,
        })
    }

    /// Vocabulary replacement rate: replaced tokens / total original tokens.
    ///
    /// Positional comparison when token counts match; otherwise replaced
    /// tokens are estimated as `total - LCS(original, rewritten)`. Returns
    /// 0.0 when the original has no content tokens.
    pub fn vocabulary_replacement_rate(&self, original: &str, rewritten: &str) -> Result<f64> {
        let original_surfaces = self.content_surfaces(original)?;
        let rewritten_surfaces = self.content_surfaces(rewritten)?;

        let total = original_surfaces.len();
        if total == 0 {
            return Ok(0.0);
        }

        let replaced = if original_surfaces.len() == rewritten_surfaces.len() {
            original_surfaces
                .iter()
                .zip(rewritten_surfaces.iter())
                .filter(|(o, r)| o != r)
                .count()
        } else {
            let lcs = lcs_length(&original_surfaces, &rewritten_surfaces);
            total.saturating_sub(lcs)
        };

        Ok(replaced as f64 / total as f64)
    }

    /// Type-token ratio: unique surfaces / total surfaces.
    pub fn type_token_ratio(&self, text: &str) -> Result<f64> {
        let surfaces = self.content_surfaces(text)?;
        let total = surfaces.len();
        if total == 0 {
            return Ok(0.0);
        }

        let mut unique: AHashMap<&str, ()> = AHashMap::new();
        for surface in &surfaces {
            unique.insert(surface.as_str(), ());
        }
        Ok(unique.len() as f64 / total as f64)
    }

    fn content_surfaces(&self, text: &str) -> Result<Vec<String>> {
        let tokens = self.tokenizer.tokenize(text)?;
        Ok(tokens
            .iter()
            .filter(|t| is_content_token(t))
            .map(|t| t.surface.clone())
            .collect())
    }
}

/// Exclude punctuation and whitespace tokens from counts.
fn is_content_token(token: &Token) -> bool {
    !token.surface.trim().is_empty() && token.pos != "記号" && token.pos != "PUNCT"
}

/// Length of the longest common subsequence of two surface sequences.
fn lcs_length(a: &[String], b: &[String]) -> usize {
    let (n, m) = (a.len(), b.len());
    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i][j - 1].max(dp[i - 1][j])
            };
        }
    }
    dp[n][m]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;

    fn evaluator() -> MetricsEvaluator {
        MetricsEvaluator::new(Arc::new(UnicodeWordTokenizer::new()), Regime::Surface)
    }

    #[test]
    fn test_constraint_check_clean() {
        let banned = BannedSet::case_insensitive(['z']).unwrap();
        let check = evaluator().check_constraint("a cat sat", &banned).unwrap();
        assert!(!check.violated);
        assert_eq!(check.count, 0);
        assert!(check.found.is_empty());
    }

    #[test]
    fn test_constraint_check_counts_occurrences() {
        let banned = BannedSet::case_insensitive(['e']).unwrap();
        let check = evaluator().check_constraint("The eel fled", &banned).unwrap();
        assert!(check.violated);
        assert_eq!(check.found, vec!['e']);
        assert_eq!(check.count, 4);
    }

    #[test]
    fn test_vrr_positional() {
        let vrr = evaluator()
            .vocabulary_replacement_rate("the cat sat", "a cat sat")
            .unwrap();
        assert!((vrr - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_vrr_lcs_fallback() {
        // Token counts differ: 4 vs 3, LCS = 3 kept tokens.
        let vrr = evaluator()
            .vocabulary_replacement_rate("the big cat sat", "big cat sat")
            .unwrap();
        assert!((vrr - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_vrr_empty_original() {
        assert_eq!(
            evaluator().vocabulary_replacement_rate("", "x").unwrap(),
            0.0
        );
    }

    #[test]
    fn test_ttr() {
        let ttr = evaluator().type_token_ratio("a a b").unwrap();
        assert!((ttr - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(evaluator().type_token_ratio("").unwrap(), 0.0);
    }

    #[test]
    fn test_lcs_length() {
        let a: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let b: Vec<String> = ["b", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(lcs_length(&a, &b), 2);
        assert_eq!(lcs_length(&a, &[]), 0);
    }
}
