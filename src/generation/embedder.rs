//! Text embedding client used for candidate ranking.
//!
//! The lexical-semantic strategy ranks synonym candidates by cosine
//! similarity of contextual embeddings. [`Embedder`] is the contract;
//! [`OpenAiEmbedder`] is a blocking client for the OpenAI embeddings API.

use serde::{Deserialize, Serialize};

use crate::error::{LipogramError, Result};

/// Trait for text embedding services.
pub trait Embedder: Send + Sync {
    /// Generate a fixed-length embedding vector for the given text.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Dimension of the produced vectors.
    fn dimension(&self) -> usize;

    /// Get the name of this embedder (for debugging and tracing).
    fn name(&self) -> &'static str;
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 for mismatched lengths or zero-magnitude vectors, which
/// ranks such candidates last rather than failing the attempt.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Request structure for the OpenAI embeddings API.
#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

/// Response structure from the OpenAI embeddings API.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

/// Individual embedding data from the API response.
#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Blocking client for the OpenAI embeddings API.
pub struct OpenAiEmbedder {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
    dimension: usize,
}

impl std::fmt::Debug for OpenAiEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiEmbedder")
            .field("model", &self.model)
            .field("dimension", &self.dimension)
            .finish()
    }
}

impl OpenAiEmbedder {
    /// Create a new OpenAI embedder.
    ///
    /// Known model dimensions are filled in automatically; unknown models
    /// default to 1536.
    pub fn new<S: Into<String>>(api_key: S, model: S) -> Self {
        let model = model.into();
        let dimension = match model.as_str() {
            "text-embedding-3-large" => 3072,
            "text-embedding-3-small" | "text-embedding-ada-002" => 1536,
            _ => 1536,
        };
        OpenAiEmbedder {
            client: reqwest::blocking::Client::new(),
            endpoint: "https://api.openai.com/v1/embeddings".to_string(),
            api_key: api_key.into(),
            model,
            dimension,
        }
    }

    /// Override the endpoint, for OpenAI-compatible local servers.
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Embedder for OpenAiEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            model: self.model.clone(),
            input: vec![text.to_string()],
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
                "embedding request failed with status {status}: {body}"
            )));
        }

        let parsed: EmbeddingResponse = response.json()?;
        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| LipogramError::generation("embedding response contained no data"))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &'static str {
        "openai_embedder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_response_deserialization() {
        let body = r#"{"data":[{"embedding":[0.1,0.2],"index":0}],"model":"text-embedding-3-small"}"#;
        let parsed: EmbeddingResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data[0].embedding, vec![0.1, 0.2]);
    }

    #[test]
    fn test_known_dimensions() {
        assert_eq!(OpenAiEmbedder::new("k", "text-embedding-3-large").dimension(), 3072);
        assert_eq!(OpenAiEmbedder::new("k", "text-embedding-3-small").dimension(), 1536);
    }
}
