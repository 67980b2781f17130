use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while talking to an embedding provider.
///
/// None of these reach the caller of `translate`: the engine logs them and
/// falls back to lexical classification.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Embedding provider error: {0}")]
    Embedding(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding provider timed out after {0:?}")]
    Timeout(Duration),
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_budget() {
        let err = EngineError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "Embedding provider timed out after 250ms");
    }

    #[test]
    fn test_embedding_message() {
        let err = EngineError::Embedding("Empty response from Ollama".to_string());
        assert_eq!(
            err.to_string(),
            "Embedding provider error: Empty response from Ollama"
        );
    }
}
