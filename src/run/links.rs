//! Stage one controller: paginated link discovery
//!
//! Walks the configured page range in order, one page at a time,
//! appending discovered links to the sink as they are found and pausing
//! between pages. Stops early when the termination tracker trips or an
//! interrupt is requested.

use crate::config::Config;
use crate::discover::{DiscoveryState, LinkDiscoverer, TerminationTracker, LISTING_READY_SELECTORS};
use crate::render::Renderer;
use crate::run::pace::{OpClass, RateLimiter};
use crate::run::retry::RetryOrchestrator;
use crate::run::Shutdown;
use crate::sink::LinkSink;
use crate::Result;
use tokio::time::sleep;

/// What a discovery run accomplished
#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlOutcome {
    pub pages_visited: u32,
    pub links_appended: u64,
    pub stopped_early: bool,
    pub interrupted: bool,
}

/// Drives discovery over the configured listing page range
pub struct CrawlController<'a, R: Renderer> {
    config: &'a Config,
    orchestrator: &'a RetryOrchestrator<'a, R>,
    limiter: &'a RateLimiter,
    discoverer: LinkDiscoverer,
    shutdown: Shutdown,
}

impl<'a, R: Renderer> CrawlController<'a, R> {
    pub fn new(
        config: &'a Config,
        orchestrator: &'a RetryOrchestrator<'a, R>,
        limiter: &'a RateLimiter,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            config,
            orchestrator,
            limiter,
            discoverer: LinkDiscoverer::with_default_selectors(&config.site.item_marker),
            shutdown,
        }
    }

    /// Visits pages start..=end, emitting links to the sink
    pub async fn run(&self, sink: &mut LinkSink) -> Result<CrawlOutcome> {
        let crawl = &self.config.crawl;
        let mut tracker = TerminationTracker::new(crawl.empty_page_threshold);
        let mut outcome = CrawlOutcome::default();

        for page in crawl.start_page..=crawl.end_page {
            if self.shutdown.is_triggered() {
                tracing::info!("Interrupt requested, stopping discovery");
                outcome.interrupted = true;
                break;
            }

            let url = self.config.listing_url(page);
            tracing::info!("Processing page {}/{}", page, crawl.end_page);

            let links = self
                .orchestrator
                .discover_links(&self.discoverer, LISTING_READY_SELECTORS, &url)
                .await;
            outcome.pages_visited += 1;

            for link in &links {
                sink.append(link)?;
            }
            outcome.links_appended += links.len() as u64;
            tracing::info!(
                "Found {} link(s) on page {} ({} total)",
                links.len(),
                page,
                outcome.links_appended
            );

            if tracker.observe_page(links.len()) == DiscoveryState::Stopped {
                tracing::info!(
                    "{} consecutive empty pages, assuming end of results",
                    crawl.empty_page_threshold
                );
                outcome.stopped_early = true;
                break;
            }

            if page < crawl.end_page && !self.shutdown.is_triggered() {
                let pause = self.limiter.delay(OpClass::PagePause);
                tracing::debug!("Waiting {:.2}s before next page", pause.as_secs_f64());
                sleep(pause).await;
            }
        }

        Ok(outcome)
    }
}
