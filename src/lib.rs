//! Lorekeeper: a book archive crawler
//!
//! This crate walks a hierarchical book archive (series index pages leading to
//! leaf book pages) and extracts a structured record from every book it reaches,
//! or snapshots each book's main content region to disk.

pub mod book;
pub mod config;
pub mod crawler;
pub mod output;

use thiserror::Error;

/// Main error type for Lorekeeper operations
#[derive(Debug, Error)]
pub enum LoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("Cannot resolve link '{href}': {source}")]
    InvalidLink {
        href: String,
        source: ::url::ParseError,
    },

    #[error("Main content container missing in {url}")]
    MissingContent { url: String },

    #[error("Cannot derive a snapshot file name from {url}")]
    SnapshotPath { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
}

/// Result type alias for Lorekeeper operations
pub type Result<T> = std::result::Result<T, LoreError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use book::{extract, Book};
pub use config::{select_collections, CollectionEntry, Config};
pub use crawler::{HttpSource, PageSource, TraversalSummary, Traverser};
pub use output::{write_books, OutputFormat, RecordCollector, SnapshotWriter, Visitor};
