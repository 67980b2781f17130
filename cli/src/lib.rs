//! # sqlchat CLI Library
//!
//! Command-line front end for [`sqlchat_engine`]: translate plain-English
//! questions into SQL and manage the settings used to do it.
//!
//! ## Modules
//!
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration management
//! - [`errors`] - Error display helpers
//! - [`exit_codes`] - Standard exit codes

pub mod commands;
pub mod config;
pub mod errors;
pub mod exit_codes;

pub use config::{Config, EmbeddingConfig};
