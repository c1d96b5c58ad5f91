//! Nhadat-Harvest: a polite real-estate listing harvester
//!
//! This crate implements a two-stage scraping pipeline: paginated link
//! discovery over a listing site, followed by per-item structured field
//! extraction into an append-only CSV sink. One page is in flight at a
//! time and every fetch is paced with randomized delays.

pub mod config;
pub mod discover;
pub mod extract;
pub mod render;
pub mod run;
pub mod sink;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(#[from] render::RenderError),

    #[error("Sink error: {0}")]
    Sink(#[from] sink::SinkError),

    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use discover::{DiscoveryState, LinkDiscoverer, TerminationTracker};
pub use extract::{FieldExtractor, PropertyRecord};
pub use render::{DocumentView, Renderer};
