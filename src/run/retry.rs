//! Bounded retry around a full fetch-and-extract cycle
//!
//! A failed cycle (navigation fault, HTTP error) is re-run from scratch
//! after a randomized backoff, up to a fixed number of retries. The
//! orchestrator never surfaces a fault for item extraction: after the
//! last attempt it returns a best-effort record whose only guaranteed
//! field is the url. A missing readiness marker is not a fault; the
//! cycle proceeds with whatever content is present.

use crate::config::FetchConfig;
use crate::discover::LinkDiscoverer;
use crate::extract::{FieldExtractor, PropertyRecord, ITEM_READY_SELECTORS};
use crate::render::{DocumentView, RenderError, Renderer};
use crate::run::pace::{OpClass, RateLimiter};
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Runs fetch cycles with readiness polling, pacing and bounded retry
pub struct RetryOrchestrator<'a, R: Renderer> {
    renderer: &'a R,
    limiter: &'a RateLimiter,
    max_retries: u32,
    ready_timeout: Duration,
    ready_poll: Duration,
}

impl<'a, R: Renderer> RetryOrchestrator<'a, R> {
    pub fn new(renderer: &'a R, limiter: &'a RateLimiter, fetch: &FetchConfig) -> Self {
        Self {
            renderer,
            limiter,
            max_retries: fetch.max_retries,
            ready_timeout: Duration::from_secs(fetch.ready_timeout_secs),
            ready_poll: Duration::from_secs(fetch.ready_poll_secs),
        }
    }

    /// Fetches and extracts one item, always returning a record
    ///
    /// Makes at most `max_retries + 1` attempts; on exhaustion the
    /// record carries only the url.
    pub async fn extract_item(&self, extractor: &FieldExtractor, url: &str) -> PropertyRecord {
        for attempt in 0..=self.max_retries {
            match self.render_ready(url, ITEM_READY_SELECTORS).await {
                Ok(doc) => {
                    sleep(self.limiter.delay(OpClass::ItemFetch)).await;
                    return extractor.extract(&doc, url);
                }
                Err(e) => self.note_failure(url, attempt, &e).await,
            }
        }

        tracing::warn!(
            "Giving up on {} after {} attempt(s); emitting best-effort record",
            url,
            self.max_retries + 1
        );
        PropertyRecord::for_url(url)
    }

    /// Fetches one listing page and discovers its item links
    ///
    /// Shares the retry policy with item extraction; exhaustion yields
    /// an empty link set, which the termination tracker treats like any
    /// other empty page.
    pub async fn discover_links(
        &self,
        discoverer: &LinkDiscoverer,
        ready: &[&str],
        url: &str,
    ) -> Vec<String> {
        for attempt in 0..=self.max_retries {
            match self.render_ready(url, ready).await {
                Ok(doc) => {
                    sleep(self.limiter.delay(OpClass::ListingFetch)).await;
                    return discoverer.discover(&doc, url);
                }
                Err(e) => self.note_failure(url, attempt, &e).await,
            }
        }

        tracing::warn!(
            "Giving up on listing page {} after {} attempt(s)",
            url,
            self.max_retries + 1
        );
        Vec::new()
    }

    async fn note_failure(&self, url: &str, attempt: u32, error: &RenderError) {
        tracing::warn!(
            "Fetch attempt {}/{} for {} failed: {}",
            attempt + 1,
            self.max_retries + 1,
            url,
            error
        );
        if attempt < self.max_retries {
            let backoff = self.limiter.delay(OpClass::RetryBackoff);
            tracing::info!("Retrying {} in {:.1}s", url, backoff.as_secs_f64());
            sleep(backoff).await;
        }
    }

    /// Renders a page, polling until a readiness marker appears or the
    /// timeout elapses; a late page is used as-is
    async fn render_ready(&self, url: &str, ready: &[&str]) -> Result<DocumentView, RenderError> {
        let deadline = Instant::now() + self.ready_timeout;
        let mut doc = DocumentView::parse(&self.renderer.render(url).await?);

        while !doc.has_any(ready) {
            if Instant::now() >= deadline {
                tracing::warn!("Readiness timeout for {} - proceeding anyway", url);
                break;
            }
            sleep(self.ready_poll).await;
            doc = DocumentView::parse(&self.renderer.render(url).await?);
        }

        Ok(doc)
    }
}
