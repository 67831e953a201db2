//! Environment-backed configuration.
//!
//! Credentials and model ids come from the environment so they never pass
//! through the CLI (or shell history). The API key is validated up front:
//! a missing key fails before any text is touched, not mid-rewrite.

use std::env;

use crate::error::{LipogramError, Result};

/// Default chat model when `LIPOGRAM_CHAT_MODEL` is unset.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";

/// Default embedding model when `LIPOGRAM_EMBED_MODEL` is unset.
pub const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-small";

/// Runtime configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key (`OPENAI_API_KEY`, required).
    pub api_key: String,
    /// Chat completion model id (`LIPOGRAM_CHAT_MODEL`).
    pub chat_model: String,
    /// Embedding model id (`LIPOGRAM_EMBED_MODEL`).
    pub embed_model: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Fails fast with a configuration error when `OPENAI_API_KEY` is
    /// missing or blank.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                LipogramError::config(
                    "OPENAI_API_KEY is not set; export it before running",
                )
            })?;

        Ok(Config {
            api_key,
            chat_model: env::var("LIPOGRAM_CHAT_MODEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            embed_model: env::var("LIPOGRAM_EMBED_MODEL")
                .unwrap_or_else(|_| DEFAULT_EMBED_MODEL.to_string()),
        })
    }

    /// Override the chat model (CLI `--model` wins over the environment).
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }
}
