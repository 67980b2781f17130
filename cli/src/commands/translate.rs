//! # Translate Command
//!
//! Turns one plain-English question into a SQL statement.
//!
//! ## Usage
//!
//! ```bash
//! # Keyword or embedding classification, depending on config
//! sqlchat translate "how many employees"
//!
//! # Force a table and print the full breakdown
//! sqlchat translate "show name, salary where salary greater than 50000" --table staff --json
//!
//! # Skip embeddings entirely
//! sqlchat translate "delete employees" --mode lexical
//! ```

use anyhow::{Context, Result};
use sqlchat_engine::{
    EmbeddingProvider, EngineConfig, SqlStatement, TranslateResponse, Translation, TranslationMode,
    Translator,
};
use std::sync::Arc;

use crate::config::Config;
use crate::errors::{
    display_config_error, display_provider_error, display_validation_error, display_warning,
};
use crate::exit_codes::*;

/// Arguments for the translate command
#[derive(Debug, Clone)]
pub struct TranslateArgs {
    /// Natural-language question
    pub query: String,
    /// Table to use instead of the one named in the question
    pub table: Option<String>,
    /// Override the configured translation mode
    pub mode: Option<TranslationMode>,
    /// Override the configured similarity threshold
    pub threshold: Option<f32>,
    /// Print the full translation as JSON
    pub json: bool,
}

/// Execute the translate command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - A statement was printed
/// * `Ok(EXIT_INVALID_INPUT)` - Empty query or bad threshold
/// * `Ok(EXIT_CONFIG_ERROR)` - Config file could not be read
/// * `Ok(EXIT_PROVIDER_ERROR)` - Configured embedding provider could not be built
pub async fn execute(args: TranslateArgs) -> Result<i32> {
    if let Err(message) = validate(&args) {
        display_validation_error(&message);
        return Ok(EXIT_INVALID_INPUT);
    }

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            display_config_error(&format!("{:#}", e));
            return Ok(EXIT_CONFIG_ERROR);
        }
    };

    let engine = engine_config(&config, &args);
    let provider = if engine.mode == TranslationMode::Semantic {
        match config.embedding.as_ref().map(|e| e.build_provider()) {
            Some(Ok(provider)) => Some(provider),
            Some(Err(e)) => {
                display_provider_error(&format!("{:#}", e));
                return Ok(EXIT_PROVIDER_ERROR);
            }
            None => {
                log::info!("No embedding provider configured; classifying by keywords");
                None
            }
        }
    } else {
        None
    };

    let translation = translate(provider, &engine, &args).await;
    print_translation(translation, args.json)?;
    Ok(EXIT_SUCCESS)
}

/// Check arguments before touching config or providers.
fn validate(args: &TranslateArgs) -> std::result::Result<(), String> {
    if args.query.trim().is_empty() {
        return Err("query is empty".to_string());
    }
    if let Some(threshold) = args.threshold {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(format!(
                "threshold must be between 0.0 and 1.0, got {}",
                threshold
            ));
        }
    }
    Ok(())
}

/// Stored engine settings with command-line overrides applied.
fn engine_config(config: &Config, args: &TranslateArgs) -> EngineConfig {
    let mut engine = config.engine.clone();
    if let Some(mode) = args.mode {
        engine = engine.with_mode(mode);
    }
    if let Some(threshold) = args.threshold {
        engine = engine.with_threshold(threshold);
    }
    engine
}

/// Build a translator and run the question through it.
///
/// If the keyword index cannot be embedded up front the question is
/// translated lexically instead of retrying the provider.
async fn translate(
    provider: Option<Arc<dyn EmbeddingProvider>>,
    engine: &EngineConfig,
    args: &TranslateArgs,
) -> Translation {
    let mut translator = Translator::new(provider, engine);
    log::debug!("Translation mode: {}", translator.mode().as_str());

    if let Err(e) = translator.warm_up().await {
        display_warning(&format!(
            "embedding provider unavailable ({}); classifying by keywords",
            e
        ));
        translator = Translator::lexical();
    }

    translator
        .translate_detailed(&args.query, args.table.as_deref())
        .await
}

fn print_translation(translation: Translation, json: bool) -> Result<()> {
    if let SqlStatement::Unsupported { reason, .. } = &translation.statement {
        display_warning(&format!("{}; the statement is a placeholder", reason));
    }

    if json {
        let response = TranslateResponse::from(translation);
        let out = serde_json::to_string_pretty(&response)
            .context("Failed to serialize translation")?;
        println!("{}", out);
    } else {
        println!("{}", translation.statement.sql());
    }
    Ok(())
}
