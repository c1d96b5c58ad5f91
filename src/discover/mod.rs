//! Stage one: item link discovery on listing pages
//!
//! Candidate selectors are tried in priority order; the first one that
//! matches anything wins and later selectors are not consulted. Hrefs
//! are resolved against the listing page URL, filtered by the item-path
//! marker and deduplicated within the page, preserving DOM order.
//! Cross-page dedup is intentionally not performed.

mod termination;

pub use termination::{DiscoveryState, TerminationTracker};

use crate::render::DocumentView;
use std::collections::HashSet;
use url::Url;

/// Candidate link selectors for listing pages, in priority order
pub const LINK_SELECTORS: &[&str] = &[
    "div.product-item a.product-title",
    "a.js__product-link-for-product-id",
    "a[href*='/ban-']",
    "div.product-item a",
];

/// Elements whose presence means a listing page has finished loading
pub const LISTING_READY_SELECTORS: &[&str] = &[
    "div.product-item",
    "a.js__product-link-for-product-id",
    "a[href*='/ban-']",
];

/// Finds item URLs on a rendered listing page
pub struct LinkDiscoverer {
    selectors: Vec<String>,
    marker: String,
}

impl LinkDiscoverer {
    pub fn new(selectors: Vec<String>, marker: String) -> Self {
        Self { selectors, marker }
    }

    /// Discoverer with the built-in selector list and the given marker
    pub fn with_default_selectors(marker: &str) -> Self {
        Self::new(
            LINK_SELECTORS.iter().map(|s| s.to_string()).collect(),
            marker.to_string(),
        )
    }

    /// Extracts item links from a listing page
    ///
    /// Site-relative hrefs are resolved against `page_url` so the sink
    /// only ever holds fetchable absolute URLs. Returns an empty vec
    /// when nothing matches; callers treat that as an ordinary empty
    /// page, not an error.
    pub fn discover(&self, doc: &DocumentView, page_url: &str) -> Vec<String> {
        let base = match Url::parse(page_url) {
            Ok(base) => base,
            Err(e) => {
                tracing::warn!("Listing page URL {} is not absolute: {}", page_url, e);
                return Vec::new();
            }
        };

        for raw in &self.selectors {
            let elements = doc.find_all(raw);
            if elements.is_empty() {
                continue;
            }

            let mut seen = HashSet::new();
            let mut links = Vec::new();
            for element in elements {
                let Some(href) = DocumentView::attribute(element, "href") else {
                    continue;
                };
                let Ok(resolved) = base.join(&href) else {
                    tracing::debug!("Skipping unresolvable href '{}'", href);
                    continue;
                };
                let resolved = resolved.to_string();
                if !resolved.contains(&self.marker) {
                    continue;
                }
                if seen.insert(resolved.clone()) {
                    links.push(resolved);
                }
            }

            // First selector with matches decides the result, even if
            // every href failed the marker filter.
            tracing::debug!(
                "Selector '{}' yielded {} item link(s)",
                raw,
                links.len()
            );
            return links;
        }

        Vec::new()
    }
}
