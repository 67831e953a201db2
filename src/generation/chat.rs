//! Chat completion client for the generative rewriting strategy.
//!
//! Defines the [`ChatClient`] trait the candidate generator depends on,
//! plus [`OpenAiChatClient`], a blocking client for any OpenAI-compatible
//! chat-completions endpoint.

use serde::{Deserialize, Serialize};

use crate::error::{LipogramError, Result};

/// Default sampling temperature for replacement generation.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Default completion length cap; replacements are single words.
pub const DEFAULT_MAX_TOKENS: u32 = 100;

/// Trait for language-generation services.
///
/// A single call may fail with a generation error; the rewrite engine
/// treats such failures as a non-productive attempt, never as a fatal
/// condition.
pub trait ChatClient: Send + Sync {
    /// Send a prompt and return the raw completion text.
    fn complete(&self, prompt: &str) -> Result<String>;

    /// Get the name of this client (for debugging and tracing).
    fn name(&self) -> &'static str;
}

/// Request body for the chat completions API.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

/// A single chat message.
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Response body from the chat completions API.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Blocking client for an OpenAI-compatible chat completions endpoint.
pub struct OpenAiChatClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl std::fmt::Debug for OpenAiChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiChatClient {
    /// Create a new client for the standard OpenAI endpoint.
    pub fn new<S: Into<String>>(api_key: S, model: S) -> Self {
        Self::with_endpoint(
            "https://api.openai.com/v1/chat/completions".to_string(),
            api_key.into(),
            model.into(),
        )
    }

    /// Create a client against a custom OpenAI-compatible endpoint.
    pub fn with_endpoint(endpoint: String, api_key: String, model: String) -> Self {
        OpenAiChatClient {
            client: reqwest::blocking::Client::new(),
            endpoint,
            api_key,
            model,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the completion length cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl ChatClient for OpenAiChatClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(LipogramError::generation(format!(
                "chat completion failed with status {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response.json()?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LipogramError::generation("chat completion returned no content"))?;

        Ok(content)
    }

    fn name(&self) -> &'static str {
        "openai_chat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4.1-nano".to_string(),
            messages: vec![ChatMessage {
                role: "user",
                content: "hello".to_string(),
            }],
            temperature: 0.5,
            max_tokens: 100,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4.1-nano");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 100);
    }

    #[test]
    fn test_response_deserialization() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"feline"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("feline")
        );
    }

    #[test]
    fn test_client_builder() {
        let client = OpenAiChatClient::new("key", "gpt-4.1-nano")
            .with_temperature(0.7)
            .with_max_tokens(50);
        assert_eq!(client.temperature, 0.7);
        assert_eq!(client.max_tokens, 50);
        assert_eq!(client.name(), "openai_chat");
    }
}
