//! Translation orchestrator.
//!
//! Combines intent classification, clause extraction and SQL synthesis into
//! a single service object that is built once and shared across requests.

use std::sync::Arc;

use crate::config::{EngineConfig, TranslationMode};
use crate::embeddings::{EmbeddingProvider, content_hash};
use crate::error::EngineError;
use crate::extract;
use crate::heuristic::translate_heuristic;
use crate::routing::{SemanticIntentClassifier, classify_lexical};
use crate::synth::synthesize;
use crate::types::{IntentResolution, IntentSource, Translation};

/// Natural-language to SQL translator.
///
/// Holds the only cross-call state of the engine: the keyword embedding
/// index inside the semantic classifier. Everything else is recomputed per
/// call, so a `Translator` can be shared behind an `Arc` and used
/// concurrently.
pub struct Translator {
    semantic: Option<SemanticIntentClassifier>,
    mode: TranslationMode,
}

impl Translator {
    /// Create a translator.
    ///
    /// Semantic mode without a provider degrades to lexical mode.
    pub fn new(provider: Option<Arc<dyn EmbeddingProvider>>, config: &EngineConfig) -> Self {
        let semantic = match (config.mode, provider) {
            (TranslationMode::Semantic, Some(provider)) => {
                Some(SemanticIntentClassifier::with_settings(
                    provider,
                    config.similarity_threshold,
                    config.embedding_timeout(),
                ))
            }
            _ => None,
        };
        let mode = match (config.mode, &semantic) {
            (TranslationMode::Semantic, None) => {
                log::debug!("No embedding provider; translating in lexical mode");
                TranslationMode::Lexical
            }
            (mode, _) => mode,
        };
        Self { semantic, mode }
    }

    /// Translator that never calls an embedding provider.
    pub fn lexical() -> Self {
        Self {
            semantic: None,
            mode: TranslationMode::Lexical,
        }
    }

    /// Translator using only prefix heuristics.
    pub fn heuristic() -> Self {
        Self {
            semantic: None,
            mode: TranslationMode::Heuristic,
        }
    }

    /// Mode actually in effect.
    pub fn mode(&self) -> TranslationMode {
        self.mode
    }

    /// Build the keyword embedding index ahead of the first query.
    ///
    /// Optional: the first classification builds it otherwise. Modes without
    /// a provider have nothing to build.
    pub async fn warm_up(&self) -> Result<(), EngineError> {
        match &self.semantic {
            Some(classifier) => classifier.warm_up().await.map(|_| ()),
            None => Ok(()),
        }
    }

    /// Decide the intent of a question.
    pub async fn resolve_intent(&self, text: &str) -> IntentResolution {
        match &self.semantic {
            Some(classifier) => classifier.classify_or_lexical(text).await,
            None => IntentResolution {
                intent: classify_lexical(text),
                source: IntentSource::Lexical,
                similarity: None,
            },
        }
    }

    /// Translate a question and report how each part was resolved.
    ///
    /// Never fails: every stage has a default.
    pub async fn translate_detailed(&self, text: &str, table_hint: Option<&str>) -> Translation {
        let key = content_hash(text);
        if self.mode == TranslationMode::Heuristic {
            let translation = translate_heuristic(text);
            log::debug!("[{}] heuristic: {}", &key[..12], translation.statement.sql());
            return translation;
        }

        let resolution = self.resolve_intent(text).await;
        let spec = extract::extract_clauses(text, resolution.intent, table_hint);
        let statement = synthesize(&spec);
        log::debug!(
            "[{}] intent={} source={:?} table={} condition={:?}",
            &key[..12],
            resolution.intent,
            resolution.source,
            spec.table,
            spec.condition
        );
        if !statement.is_executable() {
            log::info!("{} is not supported; returning a placeholder", spec.intent);
        }

        Translation {
            spec,
            resolution,
            statement,
        }
    }

    /// Translate a question into one SQL statement.
    pub async fn translate(&self, text: &str, table_hint: Option<&str>) -> String {
        self.translate_detailed(text, table_hint)
            .await
            .statement
            .into_sql()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::embeddings::RandomProvider;
    use crate::types::IntentCategory;

    struct FailingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmbeddingProvider for FailingProvider {
        async fn encode(&self, _text: &str) -> Result<Vec<f32>, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(EngineError::Embedding("connection refused".to_string()))
        }

        fn dimensions(&self) -> usize {
            3
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    /// One-hot vector per category for its keyword phrases; `other` for
    /// any other text.
    struct KeywordTable {
        other: Vec<f32>,
    }

    #[async_trait]
    impl EmbeddingProvider for KeywordTable {
        async fn encode(&self, text: &str) -> Result<Vec<f32>, EngineError> {
            for (i, category) in IntentCategory::ALL.into_iter().enumerate() {
                if category.keywords().contains(&text) {
                    let mut v = vec![0.0; 5];
                    v[i] = 1.0;
                    return Ok(v);
                }
            }
            Ok(self.other.clone())
        }

        fn dimensions(&self) -> usize {
            5
        }

        fn model_name(&self) -> &str {
            "keyword-table"
        }
    }

    fn random_translator() -> Translator {
        let provider: Arc<dyn EmbeddingProvider> = Arc::new(RandomProvider::new(32));
        Translator::new(Some(provider), &EngineConfig::default())
    }

    #[tokio::test]
    async fn test_how_many_employees() {
        let translator = Translator::lexical();
        assert_eq!(
            translator.translate("how many employees", None).await,
            "SELECT COUNT(*) as count FROM employees"
        );
    }

    #[tokio::test]
    async fn test_show_all_from_accounts() {
        let sql = Translator::lexical()
            .translate("show all from accounts", None)
            .await;
        // "accounts" contains the count keyword, so only the table is fixed.
        assert!(sql.contains(" FROM accounts"), "{sql}");
        assert!(!sql.contains("employees"), "{sql}");
    }

    #[tokio::test]
    async fn test_where_comparison() {
        let sql = Translator::lexical()
            .translate("list employees where salary greater than 50000", None)
            .await;
        assert!(sql.contains("WHERE salary > 50000"), "{sql}");
    }

    #[tokio::test]
    async fn test_where_between() {
        let sql = Translator::lexical()
            .translate("show employees where salary between 50000 and 80000", None)
            .await;
        assert!(sql.contains("salary BETWEEN 50000 AND 80000"), "{sql}");
    }

    #[tokio::test]
    async fn test_delete_without_condition_is_guarded() {
        let sql = Translator::lexical()
            .translate("delete employees", None)
            .await;
        assert_ne!(sql, "DELETE FROM employees");
        assert!(sql.contains("WHERE 1=0"), "{sql}");
    }

    #[tokio::test]
    async fn test_table_hint_wins() {
        let sql = Translator::lexical()
            .translate("show all from orders", Some("ledger"))
            .await;
        assert_eq!(sql, "SELECT * FROM ledger LIMIT 100");
    }

    #[tokio::test]
    async fn test_table_keyword_inside_word() {
        let translator = Translator::lexical();
        assert_eq!(
            translator.translate("show the admin staff", None).await,
            "SELECT * FROM staff LIMIT 100"
        );
        assert_eq!(
            translator.translate("count staff within budget", None).await,
            "SELECT COUNT(*) as count FROM budget"
        );
    }

    #[tokio::test]
    async fn test_semantic_intent_overrides_keywords() {
        // Close to the delete keywords, while no keyword occurs in the text.
        let provider: Arc<dyn EmbeddingProvider> = Arc::new(KeywordTable {
            other: vec![0.0, 0.1, 0.0, 0.0, 1.0],
        });
        let translator = Translator::new(Some(provider), &EngineConfig::default());
        assert_eq!(classify_lexical("purge rows"), IntentCategory::Select);

        let t = translator.translate_detailed("purge rows", None).await;
        assert_eq!(t.resolution.intent, IntentCategory::Delete);
        assert_eq!(t.resolution.source, IntentSource::Semantic);
        assert_eq!(
            t.statement.sql(),
            "DELETE FROM employees WHERE 1=0 -- Safety: Please specify conditions"
        );
    }

    #[tokio::test]
    async fn test_unconfident_semantic_keeps_keyword_sql() {
        // Equidistant from select and delete: similarity ~0.707 per category.
        let provider: Arc<dyn EmbeddingProvider> = Arc::new(KeywordTable {
            other: vec![0.0, 1.0, 0.0, 0.0, 1.0],
        });
        let translator =
            Translator::new(Some(provider), &EngineConfig::default().with_threshold(0.75));
        let t = translator.translate_detailed("purge rows", None).await;
        assert_eq!(t.resolution.source, IntentSource::Lexical);
        assert_eq!(t.statement.sql(), "SELECT * FROM employees LIMIT 100");
    }

    #[tokio::test]
    async fn test_insert_is_unsupported() {
        let t = Translator::lexical()
            .translate_detailed("add a new employee", None)
            .await;
        assert_eq!(t.spec.intent, IntentCategory::Insert);
        assert_eq!(t.statement.sql(), "INSERT INTO employees VALUES (...)");
        assert!(!t.statement.is_executable());
    }

    #[tokio::test]
    async fn test_deterministic() {
        let translator = random_translator();
        for text in [
            "how many employees",
            "show name from staff where age more than 3",
            "please purge inactive rows",
        ] {
            let first = translator.translate_detailed(text, None).await;
            let second = translator.translate_detailed(text, None).await;
            assert_eq!(first, second, "text: {text}");
        }
    }

    #[tokio::test]
    async fn test_failing_provider_matches_lexical_translation() {
        let provider = Arc::new(FailingProvider {
            calls: AtomicUsize::new(0),
        });
        let shared: Arc<dyn EmbeddingProvider> = provider.clone();
        let translator = Translator::new(Some(shared), &EngineConfig::default());
        assert_eq!(translator.mode(), TranslationMode::Semantic);

        for text in [
            "how many employees",
            "list employees where salary greater than 50000",
            "delete employees",
        ] {
            let degraded = translator.translate_detailed(text, None).await;
            let lexical = Translator::lexical().translate_detailed(text, None).await;
            assert_eq!(degraded, lexical, "text: {text}");
        }
        assert!(provider.calls.load(Ordering::SeqCst) > 0);
        assert!(translator.warm_up().await.is_err());
    }

    #[tokio::test]
    async fn test_semantic_without_provider_is_lexical() {
        let translator = Translator::new(None, &EngineConfig::default());
        assert_eq!(translator.mode(), TranslationMode::Lexical);
        assert!(translator.warm_up().await.is_ok());
    }

    #[tokio::test]
    async fn test_exact_keyword_is_semantic_match() {
        let translator = random_translator();
        translator.warm_up().await.unwrap();
        let resolution = translator.resolve_intent("  How Many ").await;
        assert_eq!(resolution.intent, IntentCategory::Count);
        assert_eq!(resolution.source, IntentSource::Semantic);
    }

    #[tokio::test]
    async fn test_heuristic_mode() {
        let config = EngineConfig::default().with_mode(TranslationMode::Heuristic);
        let translator = Translator::new(None, &config);
        let t = translator
            .translate_detailed("show everything from orders where id equals 3", None)
            .await;
        assert_eq!(t.statement.sql(), "SELECT * FROM orders LIMIT 100");
        assert_eq!(t.resolution.source, IntentSource::Heuristic);
    }
}
