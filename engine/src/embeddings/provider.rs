//! Embedding provider trait and the HTTP-backed implementations.
//!
//! OpenAI and Ollama speak nearly the same embeddings protocol; they differ in
//! the path, the response shape, and authentication.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Capability that maps text to a fixed-length vector.
///
/// Repeated calls on identical text must yield vectors whose cosine
/// similarity to each other is close to 1.0.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Encode a single text.
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EngineError>;

    /// Encode a batch of texts, preserving order.
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EngineError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.encode(text).await?);
        }
        Ok(vectors)
    }

    /// Dimensionality of the vectors produced.
    fn dimensions(&self) -> usize;

    /// Model identifier, used in logs.
    fn model_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiEmbedding>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbedding {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    embeddings: Vec<Vec<f32>>,
}

/// POST a request and decode the JSON body, turning non-2xx into an error
/// that carries the response text.
async fn post_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    provider: &str,
) -> Result<T, EngineError> {
    let response = request.send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(EngineError::Embedding(format!(
            "{provider} API error {status}: {body}"
        )));
    }
    Ok(response.json().await?)
}

fn first_vector(mut vectors: Vec<Vec<f32>>, provider: &str) -> Result<Vec<f32>, EngineError> {
    if vectors.is_empty() {
        return Err(EngineError::Embedding(format!(
            "Empty response from {provider}"
        )));
    }
    Ok(vectors.swap_remove(0))
}

/// Vectors in input order. The API documents `index` as the input position
/// but does not promise the order of `data`.
fn openai_vectors(mut response: OpenAiResponse) -> Vec<Vec<f32>> {
    response.data.sort_by_key(|d| d.index);
    response.data.into_iter().map(|d| d.embedding).collect()
}

/// OpenAI embedding provider.
///
/// Works with OpenAI's API and any compatible endpoint.
pub struct OpenAiProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    dims: usize,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider.
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `model` - Model name (e.g., "text-embedding-3-small")
    /// * `endpoint` - API endpoint (defaults to "https://api.openai.com/v1")
    /// * `dims` - Embedding dimensions (1536 for text-embedding-3-small)
    pub fn new(
        api_key: String,
        model: String,
        endpoint: Option<String>,
        dims: Option<usize>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            model,
            dims: dims.unwrap_or(1536),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiProvider {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EngineError> {
        let vectors = self.encode_batch(&[text.to_string()]).await?;
        first_vector(vectors, "OpenAI")
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EngineError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let request = self
            .client
            .post(format!("{}/embeddings", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: texts,
            });

        let result: OpenAiResponse = post_json(request, "OpenAI").await?;
        Ok(openai_vectors(result))
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Ollama embedding provider backed by a local `ollama serve`.
pub struct OllamaProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    dims: usize,
}

impl OllamaProvider {
    /// Create a new Ollama provider.
    ///
    /// # Arguments
    /// * `model` - Model name (e.g., "nomic-embed-text")
    /// * `endpoint` - Ollama endpoint (defaults to "http://localhost:11434")
    /// * `dims` - Embedding dimensions (768 for nomic-embed-text)
    pub fn new(model: String, endpoint: Option<String>, dims: Option<usize>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint
                .unwrap_or_else(|| "http://localhost:11434".to_string())
                .trim_end_matches('/')
                .to_string(),
            model,
            dims: dims.unwrap_or(768),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaProvider {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EngineError> {
        let vectors = self.encode_batch(&[text.to_string()]).await?;
        first_vector(vectors, "Ollama")
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EngineError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let request = self
            .client
            .post(format!("{}/api/embed", self.endpoint))
            .json(&EmbeddingRequest {
                model: &self.model,
                input: texts,
            });

        let result: OllamaResponse = post_json(request, "Ollama").await?;
        Ok(result.embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
