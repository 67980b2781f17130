//! Embedding providers for generating vector representations of text.
//!
//! Remote models are reached over OpenAI-compatible APIs (including Ollama).
//! [`RandomProvider`] is the degraded, hash-seeded variant for tests.

mod provider;
mod random;

pub use provider::{EmbeddingProvider, OllamaProvider, OpenAiProvider};
pub use random::{RandomProvider, content_hash};
