//! Embedding-based intent classification.
//!
//! Every keyword phrase is encoded once into a [`KeywordIndex`]; each query is
//! encoded once and compared against it. Only a similarity strictly above the
//! threshold counts as confident. Provider failures and timeouts are reported
//! as [`SemanticVerdict::Unavailable`], never as errors.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;

use crate::embeddings::EmbeddingProvider;
use crate::error::EngineError;
use crate::store::KeywordIndex;
use crate::types::{IntentResolution, IntentSource, ScoredIntent};

use super::lexical::classify_lexical;

/// Similarity a match must exceed to be trusted.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.7;

/// Budget for a single provider call.
pub const DEFAULT_EMBEDDING_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of one semantic classification attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticVerdict {
    /// Best match is above the threshold.
    Confident(ScoredIntent),
    /// Best match (if any) is at or below the threshold.
    Unconfident(Option<ScoredIntent>),
    /// The provider failed or timed out.
    Unavailable(String),
}

/// Strict comparison: a score equal to the threshold is not confident.
pub fn is_confident(similarity: f32, threshold: f32) -> bool {
    similarity > threshold
}

/// Classifier backed by an injected [`EmbeddingProvider`].
pub struct SemanticIntentClassifier {
    provider: Arc<dyn EmbeddingProvider>,
    index: OnceCell<KeywordIndex>,
    threshold: f32,
    timeout: Duration,
}

impl SemanticIntentClassifier {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_settings(
            provider,
            DEFAULT_SIMILARITY_THRESHOLD,
            DEFAULT_EMBEDDING_TIMEOUT,
        )
    }

    pub fn with_settings(
        provider: Arc<dyn EmbeddingProvider>,
        threshold: f32,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            index: OnceCell::new(),
            threshold,
            timeout,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether the keyword index has been built.
    pub fn is_ready(&self) -> bool {
        self.index.initialized()
    }

    /// Build the keyword index if it does not exist yet.
    ///
    /// Concurrent callers wait on the same build; the provider sees each
    /// keyword phrase once. A failed build leaves the index empty so a later
    /// call can retry.
    pub async fn warm_up(&self) -> Result<&KeywordIndex, EngineError> {
        self.index
            .get_or_try_init(|| KeywordIndex::build(self.provider.as_ref(), self.timeout))
            .await
    }

    /// Classify `text` by embedding similarity.
    pub async fn classify(&self, text: &str) -> SemanticVerdict {
        let index = match self.warm_up().await {
            Ok(index) => index,
            Err(e) => {
                log::warn!("Keyword index unavailable: {e}");
                return SemanticVerdict::Unavailable(e.to_string());
            }
        };

        let text = text.trim().to_lowercase();
        let query = match tokio::time::timeout(self.timeout, self.provider.encode(&text)).await {
            Ok(Ok(vector)) => vector,
            Ok(Err(e)) => {
                log::warn!("Embedding provider failed: {e}");
                return SemanticVerdict::Unavailable(e.to_string());
            }
            Err(_) => {
                let e = EngineError::Timeout(self.timeout);
                log::warn!("{e}");
                return SemanticVerdict::Unavailable(e.to_string());
            }
        };

        match index.best_match(&query) {
            Some(best) if is_confident(best.similarity, self.threshold) => {
                SemanticVerdict::Confident(best)
            }
            other => SemanticVerdict::Unconfident(other),
        }
    }

    /// Semantic classification with the lexical classifier as fallback.
    pub async fn classify_or_lexical(&self, text: &str) -> IntentResolution {
        match self.classify(text).await {
            SemanticVerdict::Confident(best) => {
                log::debug!(
                    "Semantic intent {} (similarity {:.3})",
                    best.intent,
                    best.similarity
                );
                IntentResolution {
                    intent: best.intent,
                    source: IntentSource::Semantic,
                    similarity: Some(best.similarity),
                }
            }
            SemanticVerdict::Unconfident(best) => {
                let intent = classify_lexical(text);
                log::debug!(
                    "No confident semantic intent (best {:?}), lexical chose {intent}",
                    best.map(|b| b.similarity)
                );
                IntentResolution {
                    intent,
                    source: IntentSource::Lexical,
                    similarity: best.map(|b| b.similarity),
                }
            }
            SemanticVerdict::Unavailable(_) => IntentResolution {
                intent: classify_lexical(text),
                source: IntentSource::Lexical,
                similarity: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::types::IntentCategory;

    /// Maps each keyword phrase to a one-hot vector of its category and any
    /// other text to whatever `query` holds.
    struct KeywordFake {
        query: Vec<f32>,
        calls: AtomicUsize,
    }

    impl KeywordFake {
        fn new(query: Vec<f32>) -> Self {
            Self {
                query,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for KeywordFake {
        async fn encode(&self, text: &str) -> Result<Vec<f32>, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            for (i, category) in IntentCategory::ALL.into_iter().enumerate() {
                if category.keywords().contains(&text) {
                    let mut v = vec![0.0; 5];
                    v[i] = 1.0;
                    return Ok(v);
                }
            }
            Ok(self.query.clone())
        }

        fn dimensions(&self) -> usize {
            5
        }

        fn model_name(&self) -> &str {
            "keyword-fake"
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl EmbeddingProvider for FailingProvider {
        async fn encode(&self, _text: &str) -> Result<Vec<f32>, EngineError> {
            Err(EngineError::Embedding("model offline".to_string()))
        }

        fn dimensions(&self) -> usize {
            5
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    struct StalledProvider;

    #[async_trait]
    impl EmbeddingProvider for StalledProvider {
        async fn encode(&self, _text: &str) -> Result<Vec<f32>, EngineError> {
            std::future::pending::<Result<Vec<f32>, EngineError>>().await
        }

        fn dimensions(&self) -> usize {
            5
        }

        fn model_name(&self) -> &str {
            "stalled"
        }
    }

    fn phrase_count() -> usize {
        IntentCategory::ALL.iter().map(|c| c.keywords().len()).sum()
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!is_confident(0.7, 0.7));
        assert!(is_confident(0.7001, 0.7));
        assert!(!is_confident(0.5, 0.7));
    }

    #[tokio::test]
    async fn test_confident_match() {
        // Closest to Delete.
        let fake = Arc::new(KeywordFake::new(vec![0.0, 0.1, 0.0, 0.0, 1.0]));
        let classifier = SemanticIntentClassifier::new(fake);
        match classifier.classify("get rid of old rows").await {
            SemanticVerdict::Confident(best) => assert_eq!(best.intent, IntentCategory::Delete),
            other => panic!("expected confident verdict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_similarity_equal_to_threshold_falls_back() {
        // |(7,1,1,7)| = 10, so similarity with Count's (1,0,0,0,0) is exactly 0.7.
        let fake = Arc::new(KeywordFake::new(vec![7.0, 1.0, 1.0, 7.0, 0.0]));
        let classifier = SemanticIntentClassifier::new(fake);

        match classifier.classify("anything at all").await {
            SemanticVerdict::Unconfident(Some(best)) => {
                assert_eq!(best.intent, IntentCategory::Count);
                assert_eq!(best.similarity, 0.7);
            }
            other => panic!("expected unconfident verdict, got {other:?}"),
        }

        // Lexical fallback: "remove" is a delete keyword.
        let resolution = classifier.classify_or_lexical("remove stale rows").await;
        assert_eq!(resolution.intent, IntentCategory::Delete);
        assert_eq!(resolution.source, IntentSource::Lexical);
    }

    #[tokio::test]
    async fn test_index_built_once_across_calls() {
        let fake = Arc::new(KeywordFake::new(vec![1.0, 0.0, 0.0, 0.0, 0.0]));
        let classifier = SemanticIntentClassifier::new(fake.clone());
        assert!(!classifier.is_ready());

        classifier.classify("first").await;
        classifier.classify("second").await;

        assert!(classifier.is_ready());
        // One call per phrase plus one per query.
        assert_eq!(fake.calls.load(Ordering::SeqCst), phrase_count() + 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_use_builds_once() {
        let fake = Arc::new(KeywordFake::new(vec![1.0, 0.0, 0.0, 0.0, 0.0]));
        let classifier = Arc::new(SemanticIntentClassifier::new(fake.clone()));

        let mut handles = Vec::new();
        for i in 0..8 {
            let classifier = classifier.clone();
            handles.push(tokio::spawn(async move {
                classifier.classify(&format!("query {i}")).await
            }));
        }
        for handle in handles {
            assert!(matches!(
                handle.await.unwrap(),
                SemanticVerdict::Confident(_)
            ));
        }

        assert_eq!(fake.calls.load(Ordering::SeqCst), phrase_count() + 8);
    }

    #[tokio::test]
    async fn test_failing_provider_matches_lexical() {
        let classifier = SemanticIntentClassifier::new(Arc::new(FailingProvider));
        for text in [
            "how many employees",
            "show all from accounts",
            "add a customer",
            "change the price",
            "delete employees",
            "salaries please",
        ] {
            let resolution = classifier.classify_or_lexical(text).await;
            assert_eq!(resolution.intent, classify_lexical(text), "text: {text}");
            assert_eq!(resolution.source, IntentSource::Lexical);
        }
        assert!(!classifier.is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_provider_times_out() {
        let classifier = SemanticIntentClassifier::with_settings(
            Arc::new(StalledProvider),
            DEFAULT_SIMILARITY_THRESHOLD,
            Duration::from_millis(50),
        );
        assert!(matches!(
            classifier.classify("how many users").await,
            SemanticVerdict::Unavailable(_)
        ));
        let resolution = classifier.classify_or_lexical("how many users").await;
        assert_eq!(resolution.intent, IntentCategory::Count);
    }

    #[tokio::test]
    async fn test_zero_query_vector_is_unconfident() {
        let fake = Arc::new(KeywordFake::new(vec![0.0; 5]));
        let classifier = SemanticIntentClassifier::new(fake);
        assert_eq!(
            classifier.classify("whatever").await,
            SemanticVerdict::Unconfident(None)
        );
    }
}
