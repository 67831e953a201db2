//! Single-shot baseline rewriter.
//!
//! One generation call for the whole text, no per-token validation loop.
//! This exists purely as a comparison baseline for the sequential engine;
//! nothing checks the reply against the banned set, and a failed call
//! falls back to returning the input unchanged.

use std::sync::Arc;

use log::warn;

use crate::constraint::{BannedSet, Regime};
use crate::error::Result;
use crate::generation::chat::ChatClient;

/// Baseline rewriter issuing one completion per text.
pub struct OneShotRewriter {
    client: Arc<dyn ChatClient>,
    regime: Regime,
}

impl OneShotRewriter {
    /// Create a new one-shot rewriter.
    pub fn new(client: Arc<dyn ChatClient>, regime: Regime) -> Self {
        OneShotRewriter { client, regime }
    }

    /// Build the whole-text instruction.
    pub fn build_prompt(&self, text: &str, banned: &BannedSet) -> String {
        let banned = banned.display_list();
        let rule = match self.regime {
            Regime::Reading => {
                "The banned characters are forbidden in the PHONETIC READING (hiragana) \
                 of every word, not just the written form."
            }
            Regime::Surface => {
                "The banned characters are forbidden in the written text, case-insensitively."
            }
        };

        format!(
            "Rewrite the following text so that it does not use any of the banned \
             characters: {banned}.\n{rule}\n\
             Preserve the meaning and grammar as closely as possible.\n\
             Output only the rewritten text, nothing else.\n\n\
             Text: \"{text}\""
        )
    }

    /// Rewrite `text` in a single call; returns the input on service failure.
    pub fn rewrite(&self, text: &str, banned: &BannedSet) -> Result<String> {
        let prompt = self.build_prompt(text, banned);
        match self.client.complete(&prompt) {
            Ok(reply) => {
                let reply = reply.trim();
                let reply = reply
                    .strip_prefix('"')
                    .and_then(|r| r.strip_suffix('"'))
                    .unwrap_or(reply);
                Ok(reply.to_string())
            }
            Err(e) => {
                warn!("one-shot rewrite failed, returning input unchanged: {e}");
                Ok(text.to_string())
            }
        }
    }
}
