//! # Config Command
//!
//! Manages CLI configuration: engine tunables and the embedding provider
//! used for semantic intent classification.
//!
//! ## Usage
//!
//! ```bash
//! # Show current configuration
//! sqlchat config show
//!
//! # Use OpenAI embeddings
//! sqlchat config embedding openai --model text-embedding-3-small
//!
//! # Use a local Ollama instance
//! sqlchat config embedding ollama --endpoint http://localhost:11434 --model nomic-embed-text
//!
//! # Hash-seeded vectors, for trying the pipeline offline
//! sqlchat config embedding random --dims 384
//!
//! # Show or remove the embedding provider
//! sqlchat config embedding show
//! sqlchat config embedding remove
//! ```

use anyhow::Result;
use colored::Colorize;

use crate::config::{Config, EmbeddingConfig, config_path};
use crate::errors::{display_config_error, display_info, display_success};
use crate::exit_codes::*;

/// Embedding provider choices for configuration
#[derive(Debug, Clone)]
pub enum EmbeddingProviderArgs {
    /// OpenAI-compatible embeddings API
    OpenAi {
        model: String,
        api_key: Option<String>,
        endpoint: Option<String>,
        dims: Option<usize>,
    },
    /// Local Ollama instance
    Ollama {
        endpoint: String,
        model: String,
        dims: Option<usize>,
    },
    /// Hash-seeded vectors with no semantic signal
    Random { dims: usize },
}

/// Arguments for the config show command
#[derive(Debug)]
pub struct ConfigShowArgs {
    /// Show full API key (default: masked)
    pub show_secrets: bool,
}

/// Arguments for the config embedding command
#[derive(Debug)]
pub enum ConfigEmbeddingArgs {
    /// Configure an embedding provider
    Set(EmbeddingProviderArgs),
    /// Show current embedding configuration
    Show { show_secrets: bool },
    /// Remove embedding configuration
    Remove,
}

/// Load the stored config, reporting a broken file to the user.
fn load_config() -> Option<Config> {
    match Config::load_or_default() {
        Ok(config) => Some(config),
        Err(e) => {
            display_config_error(&format!("{:#}", e));
            None
        }
    }
}

/// Execute the config show command
///
/// Displays all current configuration settings.
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Configuration displayed successfully
/// * `Ok(EXIT_CONFIG_ERROR)` - Config file exists but is invalid
pub fn execute_show(args: ConfigShowArgs) -> Result<i32> {
    let Some(config) = load_config() else {
        return Ok(EXIT_CONFIG_ERROR);
    };

    println!();
    println!("{}", "sqlchat Configuration".bold().underline());
    println!();

    if let Ok(path) = config_path() {
        let state = if path.exists() {
            "".normal()
        } else {
            " (not created yet)".dimmed()
        };
        println!("  {} {}{}", "File:".dimmed(), path.display(), state);
        println!();
    }

    println!("{}", "Engine".cyan().bold());
    println!("  {} {}", "Mode:".dimmed(), config.engine.mode.as_str());
    println!(
        "  {} {}",
        "Similarity threshold:".dimmed(),
        config.engine.similarity_threshold
    );
    println!(
        "  {} {} ms",
        "Embedding timeout:".dimmed(),
        config.engine.embedding_timeout_ms
    );
    println!();

    println!("{}", "Embedding provider".cyan().bold());
    print_embedding(config.embedding.as_ref(), args.show_secrets);
    println!();

    Ok(EXIT_SUCCESS)
}

/// Execute the config embedding command
///
/// Configures, shows, or removes the embedding provider.
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Operation completed successfully
/// * `Ok(EXIT_CONFIG_ERROR)` - Configuration error
pub fn execute_embedding(args: ConfigEmbeddingArgs) -> Result<i32> {
    match args {
        ConfigEmbeddingArgs::Set(provider) => set_embedding_config(provider),
        ConfigEmbeddingArgs::Show { show_secrets } => show_embedding_config(show_secrets),
        ConfigEmbeddingArgs::Remove => remove_embedding_config(),
    }
}

/// Turn command arguments into a stored configuration.
fn embedding_config(provider: EmbeddingProviderArgs) -> EmbeddingConfig {
    match provider {
        EmbeddingProviderArgs::OpenAi {
            model,
            api_key,
            endpoint,
            dims,
        } => {
            let mut cfg = EmbeddingConfig::openai(&model);
            if api_key.is_some() {
                cfg.api_key = api_key;
            }
            if endpoint.is_some() {
                cfg.endpoint = endpoint;
            }
            cfg.dims = dims;
            cfg
        }
        EmbeddingProviderArgs::Ollama {
            endpoint,
            model,
            dims,
        } => {
            let mut cfg = EmbeddingConfig::ollama(&endpoint, &model);
            cfg.dims = dims;
            cfg
        }
        EmbeddingProviderArgs::Random { dims } => EmbeddingConfig::random(dims),
    }
}

fn set_embedding_config(provider: EmbeddingProviderArgs) -> Result<i32> {
    let Some(mut config) = load_config() else {
        return Ok(EXIT_CONFIG_ERROR);
    };

    let embedding = embedding_config(provider);
    config.embedding = Some(embedding.clone());
    config.save()?;

    println!();
    display_success("Embedding provider configured");
    println!();
    print_embedding(Some(&embedding), false);

    if !embedding.is_ready() {
        println!();
        eprintln!(
            "{} API key not found. Set the {} environment variable.",
            "⚠".yellow().bold(),
            embedding.api_key_env.as_deref().unwrap_or("API_KEY")
        );
    }
    println!();

    Ok(EXIT_SUCCESS)
}

fn show_embedding_config(show_secrets: bool) -> Result<i32> {
    let Some(config) = load_config() else {
        return Ok(EXIT_CONFIG_ERROR);
    };

    println!();
    println!("{}", "Embedding Configuration".bold().underline());
    println!();
    print_embedding(config.embedding.as_ref(), show_secrets);
    println!();

    Ok(EXIT_SUCCESS)
}

fn remove_embedding_config() -> Result<i32> {
    let Some(mut config) = load_config() else {
        return Ok(EXIT_CONFIG_ERROR);
    };

    if config.embedding.is_none() {
        println!();
        display_info("Embedding provider is not set.");
        println!();
        return Ok(EXIT_SUCCESS);
    }

    config.remove_embedding();
    config.save()?;

    println!();
    display_success("Embedding provider removed. Questions will be classified by keywords.");
    println!();

    Ok(EXIT_SUCCESS)
}

fn print_embedding(embedding: Option<&EmbeddingConfig>, show_secrets: bool) {
    let Some(embedding) = embedding else {
        println!("  {}", "Not configured (keyword classification only)".dimmed());
        println!();
        println!("  {} Configure with:", "→".cyan());
        println!("    sqlchat config embedding openai --model text-embedding-3-small");
        println!(
            "    sqlchat config embedding ollama --endpoint http://localhost:11434 --model nomic-embed-text"
        );
        return;
    };

    println!("  {} {}", "Provider:".dimmed(), embedding.provider.as_str());
    println!("  {} {}", "Model:".dimmed(), embedding.model);
    if let Some(endpoint) = embedding.effective_endpoint() {
        println!("  {} {}", "Endpoint:".dimmed(), endpoint);
    }
    if let Some(dims) = embedding.dims {
        println!("  {} {}", "Dimensions:".dimmed(), dims);
    }
    if let Some(ref env_var) = embedding.api_key_env {
        let status = if std::env::var(env_var).is_ok() {
            "✓ set".green().to_string()
        } else {
            "✗ not set".red().to_string()
        };
        println!("  {} {} ({})", "API Key Env:".dimmed(), env_var, status);
    }
    if let Some(ref key) = embedding.api_key {
        let display = if show_secrets {
            key.clone()
        } else {
            crate::config::mask_key(key)
        };
        println!("  {} {}", "API Key:".dimmed(), display);
    }
    let ready = if embedding.is_ready() {
        "✓ ready".green()
    } else {
        "✗ not ready (API key missing)".red()
    };
    println!("  {} {}", "Status:".dimmed(), ready);
}
