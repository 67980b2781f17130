//! sqlchat-engine: natural-language to SQL translation
//!
//! This crate turns a free-text question about a single table into one SQL
//! statement:
//! - Intent classification by keyword matching and embedding similarity
//! - Clause extraction for table, columns, and WHERE conditions
//! - SQL synthesis with a guarded DELETE and placeholder INSERT/UPDATE
//! - A reduced prefix-heuristic mode
//!
//! Translation never fails. Provider errors, timeouts and low-confidence
//! matches all fall back to keyword classification.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sqlchat_engine::{EmbeddingProvider, EngineConfig, OllamaProvider, Translator};
//!
//! # async fn run() {
//! let provider: Arc<dyn EmbeddingProvider> =
//!     Arc::new(OllamaProvider::new("nomic-embed-text".to_string(), None, None));
//! let translator = Translator::new(Some(provider), &EngineConfig::default());
//! let sql = translator.translate("how many employees", None).await;
//! assert_eq!(sql, "SELECT COUNT(*) as count FROM employees");
//! # }
//! ```

pub mod config;
pub mod embeddings;
pub mod error;
pub mod extract;
pub mod heuristic;
pub mod query;
pub mod routing;
pub mod store;
pub mod synth;
pub mod types;

pub use config::{EngineConfig, TranslationMode};
pub use embeddings::{EmbeddingProvider, OllamaProvider, OpenAiProvider, RandomProvider};
pub use error::EngineError;
pub use query::Translator;
pub use types::{
    IntentCategory, IntentResolution, IntentSource, QuerySpec, SqlStatement, TranslateRequest,
    TranslateResponse, Translation,
};
