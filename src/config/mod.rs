//! Configuration module
//!
//! Handles loading, parsing and validating TOML configuration files.
//! Every knob the controllers consume lives in one immutable [`Config`]
//! passed in at construction; there is no process-wide mutable state.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    Config, CrawlConfig, DelayRange, FetchConfig, OutputConfig, PacingConfig, SiteConfig,
};
