//! Run orchestration
//!
//! Wires the render engine, pacing, retry and sinks into the two stage
//! controllers, and owns interrupt handling. Exactly one page render is
//! in flight at any time; all waiting suspends the single worker.

mod details;
mod links;
mod pace;
mod retry;

pub use details::{ExtractOutcome, ExtractionController};
pub use links::{CrawlController, CrawlOutcome};
pub use pace::{OpClass, RateLimiter};
pub use retry::RetryOrchestrator;

use crate::config::Config;
use crate::extract::FieldExtractor;
use crate::render::HttpRenderer;
use crate::sink::{read_link_list, LinkSink, RecordSink, FALLBACK_LINKS};
use crate::Result;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative interrupt flag, checked between pages/items
///
/// The current operation always completes and flushes before the run
/// winds down; nothing is abandoned mid-write.
#[derive(Clone, Default)]
pub struct Shutdown(Arc<AtomicBool>);

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Installs a Ctrl-C handler that trips the shutdown flag
pub fn install_interrupt_handler(shutdown: Shutdown) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received; finishing the current item before exit");
            shutdown.trigger();
        }
    });
}

/// Runs stage one: discover item links over the configured page range
pub async fn run_link_discovery(config: &Config, shutdown: Shutdown) -> Result<CrawlOutcome> {
    let renderer = HttpRenderer::new(&config.fetch)?;
    let limiter = RateLimiter::new(config.pacing.clone());
    let orchestrator = RetryOrchestrator::new(&renderer, &limiter, &config.fetch);

    let mut sink = LinkSink::open(Path::new(&config.output.links_path))?;
    let controller = CrawlController::new(config, &orchestrator, &limiter, shutdown);

    let outcome = controller.run(&mut sink).await?;
    tracing::info!(
        "Discovery finished: {} page(s) visited, {} link(s) appended to {}",
        outcome.pages_visited,
        outcome.links_appended,
        config.output.links_path
    );
    Ok(outcome)
}

/// Runs stage two: extract a record for every URL in the link list
pub async fn run_detail_extraction(config: &Config, shutdown: Shutdown) -> Result<ExtractOutcome> {
    let renderer = HttpRenderer::new(&config.fetch)?;
    let limiter = RateLimiter::new(config.pacing.clone());
    let orchestrator = RetryOrchestrator::new(&renderer, &limiter, &config.fetch);
    let extractor = FieldExtractor::new()?;

    let urls = load_link_list(&config.output.links_path);
    tracing::info!("{} URL(s) to process", urls.len());

    let mut sink = RecordSink::open(Path::new(&config.output.details_path))?;
    let controller = ExtractionController::new(&orchestrator, extractor, shutdown);

    let outcome = controller.run(&urls, &mut sink).await?;
    tracing::info!(
        "Extraction finished: {} record(s) persisted to {}",
        outcome.records_persisted,
        config.output.details_path
    );
    Ok(outcome)
}

/// Reads the link list, falling back loudly to the built-in examples
/// when it cannot be read
///
/// A readable but empty list is an ordinary zero-item run, not a
/// fallback case.
fn load_link_list(path: &str) -> Vec<String> {
    match read_link_list(Path::new(path)) {
        Ok(urls) => {
            if urls.is_empty() {
                tracing::warn!("Link list {} is empty; nothing to extract", path);
            }
            urls
        }
        Err(e) => {
            tracing::warn!(
                "Could not read link list {}: {}; falling back to {} built-in example URL(s)",
                path,
                e,
                FALLBACK_LINKS.len()
            );
            FALLBACK_LINKS.iter().map(|s| s.to_string()).collect()
        }
    }
}
