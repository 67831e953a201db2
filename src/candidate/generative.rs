//! Model-prompted candidate generation.
//!
//! Builds a structured instruction for a chat model and parses the
//! single-word reply. The prompt escalates with the attempt index: direct
//! synonyms first, hypernym-level substitutions next, free paraphrase
//! last. Previously failed candidates are listed with an explicit avoid
//! instruction.
//!
//! A failed service call is logged and reported as a non-productive
//! attempt (`Ok(None)`), never as an error: the retry loop, not the
//! transport, decides when to give up.

use std::sync::Arc;

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use crate::candidate::{Candidate, CandidateGenerator, CandidateRequest, StrategyTier};
use crate::constraint::Regime;
use crate::error::Result;
use crate::generation::chat::ChatClient;

lazy_static! {
    /// Quote and bracket characters models like to wrap replies in.
    static ref WRAPPING: Regex = Regex::new(r#"[「」『』"'（）()［］\[\]]"#).unwrap();
}

/// Candidate generator that prompts a language model.
pub struct GenerativeGenerator {
    client: Arc<dyn ChatClient>,
    regime: Regime,
}

impl GenerativeGenerator {
    /// Default attempt budget for the generative path.
    pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

    /// Create a new generative generator.
    pub fn new(client: Arc<dyn ChatClient>, regime: Regime) -> Self {
        GenerativeGenerator { client, regime }
    }

    /// Build the full instruction prompt for one attempt.
    pub fn build_prompt(&self, request: &CandidateRequest<'_>) -> String {
        let banned = request.banned.display_list();
        let token = request.token;

        let mut prompt = format!(
            "The word \"{}\" must be replaced because it conflicts with the banned \
             characters: {}.\nRewrite it as a single natural word that fits the context.\n\n",
            token.surface, banned
        );

        match self.regime {
            Regime::Reading => {
                prompt.push_str(&format!(
                    "Constraint rule: the banned characters are forbidden in the word's \
                     PHONETIC READING (hiragana), not just its written form. The replacement, \
                     read aloud in hiragana, must not contain any of: {banned}.\n\n"
                ));
            }
            Regime::Surface => {
                prompt.push_str(&format!(
                    "Constraint rule: the banned characters are forbidden in the word's \
                     WRITTEN FORM, case-insensitively. The replacement must not contain any \
                     of: {banned}.\n\n"
                ));
            }
        }

        prompt.push_str("Context:\n");
        if let Some(document) = request.document {
            if document != request.sentence {
                prompt.push_str(&format!("- Full text: \"{document}\"\n"));
            }
        }
        prompt.push_str(&format!("- Current sentence: \"{}\"\n", request.sentence));
        prompt.push_str(&format!("- Target word: \"{}\"\n", token.surface));
        prompt.push_str(&format!("- Part of speech: {}\n", token.pos));

        if !request.history.is_empty() {
            let failed: Vec<&str> = request.history.iter().collect();
            prompt.push_str(&format!(
                "\nThe following candidates were already tried and rejected: \"{}\".\n\
                 Propose something entirely different from these.\n",
                failed.join("\", \"")
            ));
        }

        let strategy = match request.tier() {
            StrategyTier::Direct => {
                "Use the closest synonym or near-synonym that fits the context."
            }
            StrategyTier::Broaden => {
                "Use a broader term or hypernym that keeps the sentence flowing."
            }
            StrategyTier::Paraphrase => {
                "Freely paraphrase: any expression that preserves the sentence meaning."
            }
        };
        prompt.push_str(&format!(
            "\nStrategy: {strategy}\n\
             Keep the sentence meaning and grammar intact.\n\
             Output exactly ONE word, with no explanation or punctuation."
        ));

        prompt
    }

    /// Parse a raw model reply into a bare candidate word.
    ///
    /// Strips wrapping quote/bracket characters, then keeps only the first
    /// whitespace-delimited token. Returns `None` for empty replies.
    pub fn parse_reply(reply: &str) -> Option<String> {
        let stripped = WRAPPING.replace_all(reply.trim(), "");
        stripped
            .split_whitespace()
            .next()
            .map(|word| word.to_string())
            .filter(|word| !word.is_empty())
    }
}

impl CandidateGenerator for GenerativeGenerator {
    fn generate(&self, request: &CandidateRequest<'_>) -> Result<Option<Candidate>> {
        let prompt = self.build_prompt(request);

        let reply = match self.client.complete(&prompt) {
            Ok(reply) => reply,
            Err(e) => {
                // A single failed call only costs this attempt.
                warn!(
                    "generation attempt {} for '{}' failed: {}",
                    request.attempt, request.token.surface, e
                );
                return Ok(None);
            }
        };

        Ok(Self::parse_reply(&reply).map(|text| Candidate::new(text, 1.0)))
    }

    fn default_max_attempts(&self) -> usize {
        Self::DEFAULT_MAX_ATTEMPTS
    }

    fn name(&self) -> &'static str {
        "generative"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;
    use crate::constraint::BannedSet;
    use crate::error::LipogramError;
    use crate::rewrite::history::FailureHistory;

    struct ScriptedClient {
        reply: std::result::Result<&'static str, ()>,
    }

    impl ChatClient for ScriptedClient {
        fn complete(&self, _prompt: &str) -> Result<String> {
            match self.reply {
                Ok(reply) => Ok(reply.to_string()),
                Err(()) => Err(LipogramError::generation("boom")),
            }
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn request_fixture<'a>(
        token: &'a Token,
        banned: &'a BannedSet,
        history: &'a FailureHistory,
        attempt: usize,
    ) -> CandidateRequest<'a> {
        CandidateRequest {
            token,
            sentence: "The cat sat on the mat.",
            document: Some("The cat sat on the mat. It purred."),
            banned,
            history,
            attempt,
        }
    }

    #[test]
    fn test_parse_reply() {
        assert_eq!(GenerativeGenerator::parse_reply("feline"), Some("feline".to_string()));
        assert_eq!(
            GenerativeGenerator::parse_reply("  \"feline\"  "),
            Some("feline".to_string())
        );
        assert_eq!(
            GenerativeGenerator::parse_reply("「ネコ科」"),
            Some("ネコ科".to_string())
        );
        assert_eq!(
            GenerativeGenerator::parse_reply("feline (a cat)"),
            Some("feline".to_string())
        );
        assert_eq!(GenerativeGenerator::parse_reply("   "), None);
        assert_eq!(GenerativeGenerator::parse_reply("()"), None);
    }

    #[test]
    fn test_prompt_contains_context_and_tier() {
        let token = Token::surface_only("The", "DET");
        let banned = BannedSet::case_insensitive(['e']).unwrap();
        let history = FailureHistory::new();
        let generator = GenerativeGenerator::new(
            Arc::new(ScriptedClient { reply: Ok("a") }),
            Regime::Surface,
        );

        let prompt = generator.build_prompt(&request_fixture(&token, &banned, &history, 0));
        assert!(prompt.contains("\"The\""));
        assert!(prompt.contains("The cat sat on the mat."));
        assert!(prompt.contains("closest synonym"));
        assert!(prompt.contains("WRITTEN FORM"));

        let prompt = generator.build_prompt(&request_fixture(&token, &banned, &history, 4));
        assert!(prompt.contains("hypernym"));

        let prompt = generator.build_prompt(&request_fixture(&token, &banned, &history, 7));
        assert!(prompt.contains("paraphrase"));
    }

    #[test]
    fn test_prompt_lists_failures() {
        let token = Token::surface_only("The", "DET");
        let banned = BannedSet::case_insensitive(['e']).unwrap();
        let mut history = FailureHistory::new();
        history.insert("these");
        history.insert("them");

        let generator = GenerativeGenerator::new(
            Arc::new(ScriptedClient { reply: Ok("a") }),
            Regime::Surface,
        );
        let prompt = generator.build_prompt(&request_fixture(&token, &banned, &history, 1));
        assert!(prompt.contains("\"these\", \"them\""));
        assert!(prompt.contains("already tried"));
    }

    #[test]
    fn test_reading_regime_rule_statement() {
        let token = Token::new("家", "いえ", "名詞");
        let banned = BannedSet::new(['い']).unwrap();
        let history = FailureHistory::new();
        let generator = GenerativeGenerator::new(
            Arc::new(ScriptedClient { reply: Ok("住まい") }),
            Regime::Reading,
        );

        let prompt = generator.build_prompt(&request_fixture(&token, &banned, &history, 0));
        assert!(prompt.contains("PHONETIC READING"));
    }

    #[test]
    fn test_generate_success() {
        let token = Token::surface_only("The", "DET");
        let banned = BannedSet::case_insensitive(['e']).unwrap();
        let history = FailureHistory::new();
        let generator = GenerativeGenerator::new(
            Arc::new(ScriptedClient { reply: Ok("\"a\"") }),
            Regime::Surface,
        );

        let candidate = generator
            .generate(&request_fixture(&token, &banned, &history, 0))
            .unwrap()
            .unwrap();
        assert_eq!(candidate.text, "a");
        assert_eq!(candidate.score, 1.0);
    }

    #[test]
    fn test_service_error_is_non_productive() {
        let token = Token::surface_only("The", "DET");
        let banned = BannedSet::case_insensitive(['e']).unwrap();
        let history = FailureHistory::new();
        let generator = GenerativeGenerator::new(
            Arc::new(ScriptedClient { reply: Err(()) }),
            Regime::Surface,
        );

        let result = generator
            .generate(&request_fixture(&token, &banned, &history, 0))
            .unwrap();
        assert!(result.is_none());
    }
}
