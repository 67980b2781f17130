//! # CLI Command Implementations
//!
//! Each submodule represents a top-level command or command group.
//!
//! ## Available Commands
//!
//! - [`config`] - Manage engine settings and the embedding provider
//! - [`translate`] - Translate a plain-English question into SQL

pub mod config;
pub mod translate;
