//! Weibo-Harvest: a mobile-weibo record harvester
//!
//! This crate extracts structured records (user profiles, posts, comments,
//! follow/fan edges) from weibo.cn mobile HTML and drives the multi-stage
//! crawl that discovers them, starting from a list of seed user ids.

pub mod config;
pub mod crawler;
pub mod dom;
pub mod extract;
pub mod model;
pub mod storage;
pub mod task;

use thiserror::Error;

/// Main error type for Weibo-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Sink error: {0}")]
    Sink(#[from] storage::SinkError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Extraction-specific errors
///
/// A structural mismatch is recoverable: the caller skips the smallest
/// enclosing unit (one post, one comment) and continues with the page.
/// A time-expression failure is a hard error for the affected record.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("missing {what} in {context}")]
    Missing { what: &'static str, context: String },

    #[error("malformed permalink {href:?}")]
    Permalink { href: String },

    #[error("malformed counter text {text:?}")]
    Counter { text: String },

    #[error("unrecognized time expression {raw:?}")]
    Time { raw: String },

    #[error("no user id in {url}")]
    AnchorId { url: String },
}

/// Result type alias for Weibo-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{Comment, Profile, Record, Relationship, Tweet};
pub use task::{FetchTask, TaskPayload};
