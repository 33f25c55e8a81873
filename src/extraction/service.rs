//! Extraction service shared by the HTTP surface and the CLI.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    config::ExtractionConfig,
    metrics::{ExtractionMetrics, MetricsSnapshot},
};

use super::batch::BatchCoordinator;
use super::types::{BatchError, BatchResult, Document};

/// Owns the batch coordinator and the metrics registry for the lifetime of the process.
///
/// Construct once with explicit settings and share it through an `Arc`.
pub struct ExtractionService {
    coordinator: BatchCoordinator,
    metrics: Arc<ExtractionMetrics>,
}

/// Abstraction over the extraction pipeline used by external surfaces.
#[async_trait]
pub trait ExtractionApi: Send + Sync {
    /// Extract snippets for every submitted document.
    async fn extract_batch(&self, documents: Vec<Document>) -> Result<BatchResult, BatchError>;

    /// Settings the pipeline runs with.
    fn extraction_config(&self) -> &ExtractionConfig;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl ExtractionService {
    /// Build a service around a coordinator configured with `config`.
    pub fn new(config: ExtractionConfig) -> Self {
        tracing::info!(
            snippet_chars = config.snippet_chars,
            max_workers = config.max_workers,
            "Initializing extraction service"
        );
        Self {
            coordinator: BatchCoordinator::new(config),
            metrics: Arc::new(ExtractionMetrics::new()),
        }
    }

    /// Run one batch and record its counters.
    ///
    /// Every document with a usable identifier counts as processed, including ones whose result
    /// was overwritten by a later duplicate.
    pub async fn extract_batch(&self, documents: Vec<Document>) -> Result<BatchResult, BatchError> {
        let submitted = documents
            .iter()
            .filter(|document| !document.id().trim().is_empty())
            .count() as u64;
        let result = self.coordinator.run(documents).await?;

        let (units, errors) = result
            .values()
            .flatten()
            .fold((0u64, 0u64), |(units, errors), unit| {
                if unit.is_error {
                    (units, errors + 1)
                } else {
                    (units + 1, errors)
                }
            });
        self.metrics.record_batch(submitted, units, errors);
        Ok(result)
    }

    /// Return the current extraction metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[async_trait]
impl ExtractionApi for ExtractionService {
    async fn extract_batch(&self, documents: Vec<Document>) -> Result<BatchResult, BatchError> {
        ExtractionService::extract_batch(self, documents).await
    }

    fn extraction_config(&self) -> &ExtractionConfig {
        self.coordinator.config()
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        ExtractionService::metrics_snapshot(self)
    }
}
