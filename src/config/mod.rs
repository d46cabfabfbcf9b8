//! Configuration module for Lorekeeper
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and selecting collections from the configured name to URL table.
//!
//! # Example
//!
//! ```no_run
//! use lorekeeper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("lorekeeper.toml")).unwrap();
//! println!("Crawling {} collections", config.collections.len());
//! ```

mod parser;
mod selection;
mod types;
mod validation;

// Re-export types
pub use types::{CollectionEntry, Config, OutputConfig, SiteConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};

pub use selection::{select_collections, ALL_COLLECTIONS};
