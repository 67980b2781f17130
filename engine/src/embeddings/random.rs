//! Degraded embedding provider for tests and offline runs.
//!
//! Vectors are pseudo-random but derived from a SHA-256 of the input, so the
//! same text always maps to the same unit vector. They carry no semantic
//! signal: two paraphrases are as far apart as two unrelated sentences.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::error::EngineError;

use super::EmbeddingProvider;

/// Compute a SHA-256 hex digest of a text.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash-seeded stand-in for a real embedding model.
pub struct RandomProvider {
    dims: usize,
}

impl RandomProvider {
    pub const MODEL_NAME: &'static str = "random-sha256";

    pub fn new(dims: usize) -> Self {
        Self { dims: dims.max(1) }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut values = Vec::with_capacity(self.dims);
        let mut block: u32 = 0;
        while values.len() < self.dims {
            let mut hasher = Sha256::new();
            hasher.update(text.as_bytes());
            hasher.update(block.to_le_bytes());
            let digest = hasher.finalize();
            for chunk in digest.chunks_exact(4) {
                if values.len() == self.dims {
                    break;
                }
                let raw = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                // Map to [-1, 1].
                values.push((raw as f64 / u32::MAX as f64 * 2.0 - 1.0) as f32);
            }
            block += 1;
        }

        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut values {
                *v /= norm;
            }
        }
        values
    }
}

impl Default for RandomProvider {
    fn default() -> Self {
        Self::new(384)
    }
}

#[async_trait]
impl EmbeddingProvider for RandomProvider {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EngineError> {
        Ok(self.vector_for(text))
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn model_name(&self) -> &str {
        Self::MODEL_NAME
    }
}
