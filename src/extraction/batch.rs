//! Concurrent fan-out/fan-in over a batch of documents.
//!
//! Every document runs on the blocking pool as its own task, with at most `max_workers` tasks
//! in flight. Each task owns its document and returns its units tagged with the submission
//! index; the coordinator writes them into a slot per index, so completion order never affects
//! the result order.

use futures_util::{StreamExt, stream};
use std::sync::Arc;
use std::time::Instant;

use crate::config::ExtractionConfig;

use super::router::route_document;
use super::types::{
    BatchError, BatchResult, Document, ExtractionError, ExtractionFailure, ExtractionUnit,
};

/// Per-document work executed on the blocking pool.
type RouteFn = fn(Document, &ExtractionConfig) -> Vec<ExtractionUnit>;

/// Runs the extraction pipeline for a batch on a bounded worker pool.
#[derive(Debug, Clone)]
pub struct BatchCoordinator {
    config: Arc<ExtractionConfig>,
    route: RouteFn,
}

impl BatchCoordinator {
    /// Build a coordinator from explicit extraction settings.
    pub fn new(config: ExtractionConfig) -> Self {
        Self::with_route(config, route_document)
    }

    fn with_route(config: ExtractionConfig, route: RouteFn) -> Self {
        Self {
            config: Arc::new(config),
            route,
        }
    }

    /// Settings this coordinator was built with.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract every document and aggregate the results in submission order.
    ///
    /// Documents with blank identifiers are skipped; when nothing remains the call fails with
    /// [`BatchError::EmptyBatch`]. Later documents sharing an identifier overwrite earlier
    /// results but keep the key's original position.
    pub async fn run(&self, documents: Vec<Document>) -> Result<BatchResult, BatchError> {
        let documents: Vec<Document> = documents
            .into_iter()
            .filter(|document| !document.id().trim().is_empty())
            .collect();
        if documents.is_empty() {
            return Err(BatchError::EmptyBatch);
        }

        let started = Instant::now();
        let total = documents.len();
        let workers = self.config.max_workers.max(1).min(total);
        tracing::info!(documents = total, workers, "Starting extraction batch");

        let ids: Vec<String> = documents.iter().map(|doc| doc.id().to_string()).collect();
        let mut slots: Vec<Option<Vec<ExtractionUnit>>> = vec![None; total];

        let mut completed = stream::iter(documents.into_iter().enumerate())
            .map(|(index, document)| {
                let config = Arc::clone(&self.config);
                let route = self.route;
                async move {
                    let task = tokio::task::spawn_blocking(move || route(document, &config));
                    (index, task.await)
                }
            })
            .buffer_unordered(workers);

        while let Some((index, outcome)) = completed.next().await {
            let units = match outcome {
                Ok(units) => units,
                Err(join_error) => {
                    tracing::error!(
                        document = %ids[index],
                        error = %join_error,
                        "Extraction task aborted"
                    );
                    let failure = ExtractionFailure::TaskAborted(join_error.to_string());
                    vec![ExtractionUnit::error(&ExtractionError::from(failure))]
                }
            };
            slots[index] = Some(units);
        }

        let mut result = BatchResult::with_capacity(total);
        for (id, units) in ids.into_iter().zip(slots) {
            result.insert(id, units.unwrap_or_default());
        }

        tracing::info!(
            documents = total,
            keys = result.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Extraction batch finished"
        );
        Ok(result)
    }
}

impl Default for BatchCoordinator {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}
