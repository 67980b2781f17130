//! # Configuration Management
//!
//! This module handles loading and saving CLI configuration: engine tunables
//! and the embedding provider used for semantic intent classification.
//!
//! ## Configuration File Location
//!
//! All platforms: `$XDG_CONFIG_HOME/sqlchat/config.json`, falling back to
//! `$HOME/.config/sqlchat/config.json`.
//!
//! On Windows, uses `%USERPROFILE%\.config\sqlchat\config.json` if `$HOME` is not set.
//!
//! A missing file is not an error: every setting has a default, and without
//! an embedding provider translation runs on keywords alone.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use sqlchat_engine::{
    EmbeddingProvider, EngineConfig, OllamaProvider, OpenAiProvider, RandomProvider,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable overriding the stored embedding endpoint
pub const ENDPOINT_ENV_VAR: &str = "SQLCHAT_EMBEDDING_ENDPOINT";

/// Default OpenAI-compatible endpoint
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default local Ollama endpoint
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";

/// Which embedding backend to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    Ollama,
    /// Hash-seeded vectors with no semantic signal; for local testing only
    Random,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Ollama => "ollama",
            ProviderKind::Random => "random",
        }
    }
}

/// Embedding provider configuration
///
/// # Example
///
/// ```rust
/// use sqlchat::config::EmbeddingConfig;
///
/// let config = EmbeddingConfig::ollama("http://localhost:11434", "nomic-embed-text");
/// assert!(config.is_ready());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub provider: ProviderKind,
    /// API endpoint URL (provider default when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Model name (e.g., text-embedding-3-small, nomic-embed-text)
    pub model: String,
    /// API key stored in plaintext
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable name for API key (preferred over api_key)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Vector dimensions, when the model's default is not wanted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dims: Option<usize>,
}

impl EmbeddingConfig {
    /// OpenAI embeddings, key read from `OPENAI_API_KEY`
    pub fn openai(model: &str) -> Self {
        Self {
            provider: ProviderKind::OpenAi,
            endpoint: Some(DEFAULT_OPENAI_ENDPOINT.to_string()),
            model: model.to_string(),
            api_key: None,
            api_key_env: Some("OPENAI_API_KEY".to_string()),
            dims: None,
        }
    }

    /// Local Ollama embeddings
    pub fn ollama(endpoint: &str, model: &str) -> Self {
        Self {
            provider: ProviderKind::Ollama,
            endpoint: Some(endpoint.to_string()),
            model: model.to_string(),
            api_key: None,
            api_key_env: None,
            dims: None,
        }
    }

    /// Hash-seeded vectors of the given size
    pub fn random(dims: usize) -> Self {
        Self {
            provider: ProviderKind::Random,
            endpoint: None,
            model: RandomProvider::MODEL_NAME.to_string(),
            api_key: None,
            api_key_env: None,
            dims: Some(dims),
        }
    }

    /// Endpoint to call
    ///
    /// Environment variable `SQLCHAT_EMBEDDING_ENDPOINT` takes precedence over the config file.
    pub fn effective_endpoint(&self) -> Option<String> {
        std::env::var(ENDPOINT_ENV_VAR)
            .ok()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| self.endpoint.clone())
    }

    /// Get the API key from environment or config
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(ref env_var) = self.api_key_env {
            if let Ok(key) = std::env::var(env_var) {
                return Some(key);
            }
        }
        self.api_key.clone()
    }

    /// Check if the provider can be built
    pub fn is_ready(&self) -> bool {
        match self.provider {
            ProviderKind::OpenAi => self.get_api_key().is_some(),
            ProviderKind::Ollama | ProviderKind::Random => true,
        }
    }

    /// Get a masked version of the API key for display
    pub fn masked_api_key(&self) -> Option<String> {
        self.get_api_key().map(|key| mask_key(&key))
    }

    /// Build the provider this configuration describes.
    pub fn build_provider(&self) -> Result<Arc<dyn EmbeddingProvider>> {
        let provider: Arc<dyn EmbeddingProvider> = match self.provider {
            ProviderKind::OpenAi => {
                let Some(api_key) = self.get_api_key() else {
                    bail!(
                        "no API key for OpenAI embeddings; set {}",
                        self.api_key_env.as_deref().unwrap_or("OPENAI_API_KEY")
                    );
                };
                Arc::new(OpenAiProvider::new(
                    api_key,
                    self.model.clone(),
                    self.effective_endpoint(),
                    self.dims,
                ))
            }
            ProviderKind::Ollama => Arc::new(OllamaProvider::new(
                self.model.clone(),
                self.effective_endpoint(),
                self.dims,
            )),
            ProviderKind::Random => match self.dims {
                Some(dims) => Arc::new(RandomProvider::new(dims)),
                None => Arc::new(RandomProvider::default()),
            },
        };
        log::debug!(
            "Embedding provider: {} ({} dims)",
            provider.model_name(),
            provider.dimensions()
        );
        Ok(provider)
    }
}

/// CLI configuration
///
/// # Example
///
/// ```rust,no_run
/// use sqlchat::config::{Config, EmbeddingConfig};
///
/// let config = Config::default().with_embedding(EmbeddingConfig::openai("text-embedding-3-small"));
/// config.save().expect("Failed to save config");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Translation tunables
    #[serde(default)]
    pub engine: EngineConfig,
    /// Embedding provider for semantic classification (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<EmbeddingConfig>,
}

impl Config {
    /// Set the embedding configuration
    pub fn with_embedding(mut self, embedding: EmbeddingConfig) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Remove the embedding configuration
    pub fn remove_embedding(&mut self) {
        self.embedding = None;
    }

    /// Load configuration, using defaults when no file exists yet
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            log::debug!("No config file at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the default config file
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// Mask an API key for display
///
/// Counts characters, not bytes, so non-ASCII keys cannot split a code point.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "****".to_string()
    }
}

/// Get the path to the configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs_config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("sqlchat").join("config.json"))
}

/// Get the config directory
///
/// Uses `$HOME/.config` on all platforms for consistency.
fn dirs_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .or_else(|| std::env::var("USERPROFILE").ok())
                .map(|h| PathBuf::from(h).join(".config"))
        })
}
