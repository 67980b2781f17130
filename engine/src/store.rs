//! In-memory keyword embedding index.
//!
//! Holds one vector per keyword phrase of every intent category and answers
//! "which category is closest to this query vector". The index is built once
//! and never mutated afterward.

use std::time::Duration;

use crate::embeddings::EmbeddingProvider;
use crate::error::EngineError;
use crate::types::{IntentCategory, ScoredIntent};

/// Cosine similarity of two vectors.
///
/// Returns `None` when either vector has zero norm, the lengths differ, or
/// the result is not finite.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    let similarity = dot / (norm_a * norm_b);
    similarity.is_finite().then_some(similarity)
}

/// Cached keyword vectors, grouped by category in priority order.
#[derive(Debug, Clone)]
pub struct KeywordIndex {
    entries: Vec<(IntentCategory, Vec<Vec<f32>>)>,
}

impl KeywordIndex {
    /// Encode every keyword phrase once.
    ///
    /// Each provider call gets its own `budget`; the first failure or timeout
    /// aborts the build.
    pub async fn build(
        provider: &dyn EmbeddingProvider,
        budget: Duration,
    ) -> Result<Self, EngineError> {
        let mut entries = Vec::with_capacity(IntentCategory::ALL.len());
        for category in IntentCategory::ALL {
            let mut vectors = Vec::with_capacity(category.keywords().len());
            for phrase in category.keywords() {
                let vector = tokio::time::timeout(budget, provider.encode(phrase))
                    .await
                    .map_err(|_| EngineError::Timeout(budget))??;
                vectors.push(vector);
            }
            entries.push((category, vectors));
        }
        log::debug!(
            "Built keyword index with {} phrases using {}",
            entries.iter().map(|(_, v)| v.len()).sum::<usize>(),
            provider.model_name()
        );
        Ok(Self { entries })
    }

    /// Build an index from precomputed vectors.
    pub fn from_vectors(entries: Vec<(IntentCategory, Vec<Vec<f32>>)>) -> Self {
        Self { entries }
    }

    /// Total number of cached phrase vectors.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest similarity per category, `None` when no cached vector of the
    /// category is comparable with `query`.
    pub fn category_scores(&self, query: &[f32]) -> Vec<(IntentCategory, Option<f32>)> {
        self.entries
            .iter()
            .map(|(category, vectors)| {
                let best = vectors
                    .iter()
                    .filter_map(|v| cosine_similarity(query, v))
                    .fold(None, |acc: Option<f32>, s| match acc {
                        Some(current) if current >= s => Some(current),
                        _ => Some(s),
                    });
                (*category, best)
            })
            .collect()
    }

    /// Category with the overall highest similarity.
    ///
    /// Ties go to the category declared first.
    pub fn best_match(&self, query: &[f32]) -> Option<ScoredIntent> {
        let mut best: Option<ScoredIntent> = None;
        for (intent, score) in self.category_scores(query) {
            let Some(similarity) = score else { continue };
            match best {
                Some(current) if similarity <= current.similarity => {}
                _ => best = Some(ScoredIntent { intent, similarity }),
            }
        }
        best
    }
}
