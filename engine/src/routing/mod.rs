//! Intent classification.
//!
//! Two strategies decide which operation a question asks for:
//! - [`lexical`]: keyword substrings checked in priority order, always available
//! - [`semantic`]: embedding similarity against cached keyword vectors, trusted
//!   only above a threshold and falling back to the lexical result otherwise

pub mod lexical;
pub mod semantic;

pub use lexical::{DEFAULT_INTENT, classify_lexical};
pub use semantic::{
    DEFAULT_EMBEDDING_TIMEOUT, DEFAULT_SIMILARITY_THRESHOLD, SemanticIntentClassifier,
    SemanticVerdict, is_confident,
};
