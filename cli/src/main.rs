//! # sqlchat CLI
//!
//! Ask a database question in plain English, get back one SQL statement.
//!
//! ## Usage
//!
//! ```bash
//! # Translate a question
//! sqlchat translate "how many employees"
//!
//! # Use embeddings for intent classification
//! sqlchat config embedding ollama --model nomic-embed-text
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use sqlchat::commands;
use sqlchat_engine::TranslationMode;

/// Initialize logger based on verbose flag
fn init_logger(verbose: bool) {
    let mut log_builder = env_logger::Builder::from_default_env();
    if verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    } else {
        log_builder.filter_level(log::LevelFilter::Info);
    }
    log_builder.init();
}

/// Translation mode options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    /// Embedding similarity, falling back to keywords (default)
    Semantic,
    /// Keyword matching only
    Lexical,
    /// Prefix heuristics only, no clause extraction
    Heuristic,
}

impl From<ModeArg> for TranslationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Semantic => TranslationMode::Semantic,
            ModeArg::Lexical => TranslationMode::Lexical,
            ModeArg::Heuristic => TranslationMode::Heuristic,
        }
    }
}

/// Main CLI structure
#[derive(Parser)]
#[command(name = "sqlchat")]
#[command(about = "Translate plain-English questions into SQL", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Translate a question into a SQL statement
    Translate {
        /// Natural language question (e.g., "how many employees")
        #[arg(value_name = "QUERY")]
        query: String,
        /// Table to query, overriding any table named in the question
        #[arg(long, short = 't', value_name = "TABLE")]
        table: Option<String>,
        /// Translation mode (defaults to the configured mode)
        #[arg(long, short = 'm', value_name = "MODE")]
        mode: Option<ModeArg>,
        /// Similarity a semantic match must exceed (0.0-1.0)
        #[arg(long, value_name = "THRESHOLD")]
        threshold: Option<f32>,
        /// Output the full translation as JSON
        #[arg(long)]
        json: bool,
        /// Enable verbose output
        #[arg(long, short = 'v')]
        verbose: bool,
    },
    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Config subcommands
#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show {
        /// Show full secrets instead of masked values
        #[arg(long)]
        show_secrets: bool,
    },
    /// Manage the embedding provider used for semantic classification
    Embedding {
        #[command(subcommand)]
        command: EmbeddingCommands,
    },
}

/// Embedding subcommands
#[derive(Subcommand)]
enum EmbeddingCommands {
    /// Use an OpenAI-compatible embeddings API
    Openai {
        /// Model name (e.g., text-embedding-3-small, text-embedding-3-large)
        #[arg(long, short = 'm', default_value = "text-embedding-3-small")]
        model: String,
        /// API key (optional, prefers OPENAI_API_KEY env var)
        #[arg(long, short = 'k')]
        api_key: Option<String>,
        /// API endpoint URL (for OpenAI-compatible servers)
        #[arg(long, short = 'e')]
        endpoint: Option<String>,
        /// Vector dimensions
        #[arg(long)]
        dims: Option<usize>,
    },
    /// Use a local Ollama instance
    Ollama {
        /// Ollama API endpoint
        #[arg(long, short = 'e', default_value = "http://localhost:11434")]
        endpoint: String,
        /// Model name (e.g., nomic-embed-text, mxbai-embed-large)
        #[arg(long, short = 'm', default_value = "nomic-embed-text")]
        model: String,
        /// Vector dimensions
        #[arg(long)]
        dims: Option<usize>,
    },
    /// Use hash-seeded vectors (offline testing only, no semantic signal)
    Random {
        /// Vector dimensions
        #[arg(long, default_value = "384")]
        dims: usize,
    },
    /// Show current embedding configuration
    Show {
        /// Show full secrets instead of masked values
        #[arg(long)]
        show_secrets: bool,
    },
    /// Remove embedding configuration
    Remove,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let exit_code = run_command(cli.command).await;
    std::process::exit(exit_code);
}

async fn run_command(command: Commands) -> i32 {
    use sqlchat::exit_codes::*;

    match command {
        Commands::Translate {
            query,
            table,
            mode,
            threshold,
            json,
            verbose,
        } => {
            init_logger(verbose);
            let args = commands::translate::TranslateArgs {
                query,
                table,
                mode: mode.map(TranslationMode::from),
                threshold,
                json,
            };
            match commands::translate::execute(args).await {
                Ok(exit_code) => exit_code,
                Err(e) => {
                    eprintln!("Translate error: {:#}", e);
                    EXIT_ERROR
                }
            }
        }
        Commands::Config { command } => {
            init_logger(false);
            run_config_command(command)
        }
    }
}

fn run_config_command(command: ConfigCommands) -> i32 {
    use sqlchat::exit_codes::*;

    match command {
        ConfigCommands::Show { show_secrets } => {
            let args = commands::config::ConfigShowArgs { show_secrets };
            match commands::config::execute_show(args) {
                Ok(exit_code) => exit_code,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    EXIT_CONFIG_ERROR
                }
            }
        }
        ConfigCommands::Embedding { command } => run_embedding_command(command),
    }
}

fn run_embedding_command(command: EmbeddingCommands) -> i32 {
    use commands::config::{ConfigEmbeddingArgs, EmbeddingProviderArgs};
    use sqlchat::exit_codes::*;

    let args = match command {
        EmbeddingCommands::Openai {
            model,
            api_key,
            endpoint,
            dims,
        } => ConfigEmbeddingArgs::Set(EmbeddingProviderArgs::OpenAi {
            model,
            api_key,
            endpoint,
            dims,
        }),
        EmbeddingCommands::Ollama {
            endpoint,
            model,
            dims,
        } => ConfigEmbeddingArgs::Set(EmbeddingProviderArgs::Ollama {
            endpoint,
            model,
            dims,
        }),
        EmbeddingCommands::Random { dims } => {
            ConfigEmbeddingArgs::Set(EmbeddingProviderArgs::Random { dims })
        }
        EmbeddingCommands::Show { show_secrets } => ConfigEmbeddingArgs::Show { show_secrets },
        EmbeddingCommands::Remove => ConfigEmbeddingArgs::Remove,
    };

    match commands::config::execute_embedding(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Config embedding error: {:#}", e);
            EXIT_CONFIG_ERROR
        }
    }
}
