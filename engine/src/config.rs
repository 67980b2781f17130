//! Engine settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::routing::{DEFAULT_EMBEDDING_TIMEOUT, DEFAULT_SIMILARITY_THRESHOLD};

/// How a [`Translator`](crate::Translator) decides the intent of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationMode {
    /// Embedding similarity, falling back to keywords
    #[default]
    Semantic,
    /// Keywords only
    Lexical,
    /// Prefix heuristics without clause extraction
    Heuristic,
}

impl TranslationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationMode::Semantic => "semantic",
            TranslationMode::Lexical => "lexical",
            TranslationMode::Heuristic => "heuristic",
        }
    }
}

fn default_threshold() -> f32 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_timeout_ms() -> u64 {
    DEFAULT_EMBEDDING_TIMEOUT.as_millis() as u64
}

/// Tunables for translation. Missing fields deserialize to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Similarity a semantic match must strictly exceed
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f32,
    /// Budget for each embedding provider call, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub embedding_timeout_ms: u64,
    #[serde(default)]
    pub mode: TranslationMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_threshold(),
            embedding_timeout_ms: default_timeout_ms(),
            mode: TranslationMode::default(),
        }
    }
}

impl EngineConfig {
    pub fn embedding_timeout(&self) -> Duration {
        Duration::from_millis(self.embedding_timeout_ms)
    }

    pub fn with_mode(mut self, mode: TranslationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }
}
