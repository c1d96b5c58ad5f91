//! Stage two controller: per-item field extraction
//!
//! Processes the input URL list in order. Every URL produces exactly
//! one record, flushed to the sink before the next URL is touched, so
//! interrupting the run never loses a completed extraction.

use crate::extract::FieldExtractor;
use crate::render::Renderer;
use crate::run::retry::RetryOrchestrator;
use crate::run::Shutdown;
use crate::sink::RecordSink;
use crate::Result;

/// What an extraction run accomplished
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOutcome {
    pub records_persisted: u64,
    pub interrupted: bool,
}

/// Drives extraction over an item URL list
pub struct ExtractionController<'a, R: Renderer> {
    orchestrator: &'a RetryOrchestrator<'a, R>,
    extractor: FieldExtractor,
    shutdown: Shutdown,
}

impl<'a, R: Renderer> ExtractionController<'a, R> {
    pub fn new(
        orchestrator: &'a RetryOrchestrator<'a, R>,
        extractor: FieldExtractor,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            orchestrator,
            extractor,
            shutdown,
        }
    }

    /// Extracts each URL into the sink, one flushed record per URL
    pub async fn run(&self, urls: &[String], sink: &mut RecordSink) -> Result<ExtractOutcome> {
        let mut outcome = ExtractOutcome::default();

        for (index, url) in urls.iter().enumerate() {
            if self.shutdown.is_triggered() {
                tracing::info!("Interrupt requested, stopping extraction");
                outcome.interrupted = true;
                break;
            }

            tracing::info!("Processing property {}/{}: {}", index + 1, urls.len(), url);
            let record = self.orchestrator.extract_item(&self.extractor, url).await;

            sink.append(&record)?;
            outcome.records_persisted += 1;
            tracing::info!("Saved record {}/{}", index + 1, urls.len());
        }

        Ok(outcome)
    }
}
