//! Data model types for games, libraries and news, plus YAML loading for
//! news-source seed data.
//!
//! This crate has no database dependencies. Consumers can use these types
//! directly for display or pass them to `gamerhub-db` for persistence.

pub mod types;
pub mod yaml;

pub use types::*;
pub use yaml::{YamlError, default_news_sources, load_news_sources};
