//! Queryable view over a rendered page
//!
//! Wraps a parsed HTML tree and exposes the small query surface the
//! extraction pipeline needs: ordered selector fallback, bulk selection,
//! trimmed text, attributes, and whole-page text for regex scans.
//! Lookups never fail; a missing element is an ordinary `None`.

use scraper::{ElementRef, Html, Selector};

/// A parsed page ready for selector queries
pub struct DocumentView {
    html: Html,
}

impl DocumentView {
    /// Parses an HTML body into a queryable view
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Tries each selector in order, returning the first element any of
    /// them matches
    ///
    /// Selectors that fail to parse are skipped with a warning rather
    /// than aborting the lookup.
    pub fn find_first<'a>(&'a self, selectors: &[&str]) -> Option<ElementRef<'a>> {
        for raw in selectors {
            let Ok(selector) = Selector::parse(raw) else {
                tracing::warn!("Skipping invalid selector '{}'", raw);
                continue;
            };
            if let Some(element) = self.html.select(&selector).next() {
                return Some(element);
            }
        }
        None
    }

    /// Returns every element matching the selector (possibly empty)
    pub fn find_all<'a>(&'a self, raw: &str) -> Vec<ElementRef<'a>> {
        let Ok(selector) = Selector::parse(raw) else {
            tracing::warn!("Skipping invalid selector '{}'", raw);
            return Vec::new();
        };
        self.html.select(&selector).collect()
    }

    /// Returns true if any of the selectors matches at least one element
    pub fn has_any(&self, selectors: &[&str]) -> bool {
        self.find_first(selectors).is_some()
    }

    /// First descendant of `element` matching the selector
    pub fn find_in<'a>(element: ElementRef<'a>, raw: &str) -> Option<ElementRef<'a>> {
        let selector = Selector::parse(raw).ok()?;
        element.select(&selector).next()
    }

    /// Trimmed, whitespace-normalized text content of an element
    pub fn text_of(element: ElementRef<'_>) -> String {
        element
            .text()
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// An attribute value, if present
    pub fn attribute(element: ElementRef<'_>, name: &str) -> Option<String> {
        element.value().attr(name).map(str::to_string)
    }

    /// Full page text, for regex fallback scanning
    pub fn full_text(&self) -> String {
        let root = self.html.root_element();
        Self::text_of(root)
    }
}
