//! Append-only CSV sinks and the link source
//!
//! Both sinks append to existing files, write their header exactly once
//! (only when the file is new or empty), and flush after every row so
//! an interrupted run loses at most the row in flight.

mod links;
mod records;

pub use links::{read_link_list, LinkSink, FALLBACK_LINKS, LINK_COLUMN};
pub use records::RecordSink;

use thiserror::Error;

/// Errors from sinks and the link source
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Link list has no '{0}' column")]
    MissingColumn(String),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;
