//! Render engine seam and queryable document abstraction
//!
//! The core never talks to the network directly; it asks a [`Renderer`]
//! for the content behind a URL and queries the result through a
//! [`DocumentView`]. The default engine is a plain HTTP fetcher; a JS
//! rendering engine can be swapped in behind the same trait.

mod document;
mod http;

pub use document::DocumentView;
pub use http::{build_http_client, HttpRenderer};

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a render engine
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Render engine error: {0}")]
    Engine(String),
}

/// A collaborator that navigates to a URL and yields its content
///
/// Implementations own all browser/client lifecycle concerns. The core
/// only ever asks for one page at a time.
#[async_trait]
pub trait Renderer {
    async fn render(&self, url: &str) -> Result<String, RenderError>;
}
