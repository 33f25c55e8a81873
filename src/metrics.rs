use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing extraction activity.
#[derive(Default)]
pub struct ExtractionMetrics {
    batches_processed: AtomicU64,
    documents_processed: AtomicU64,
    units_extracted: AtomicU64,
    error_units: AtomicU64,
}

impl ExtractionMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed batch with its document, unit, and error-unit counts.
    pub fn record_batch(&self, documents: u64, units: u64, errors: u64) {
        self.batches_processed.fetch_add(1, Ordering::Relaxed);
        self.documents_processed
            .fetch_add(documents, Ordering::Relaxed);
        self.units_extracted.fetch_add(units, Ordering::Relaxed);
        self.error_units.fetch_add(errors, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            batches_processed: self.batches_processed.load(Ordering::Relaxed),
            documents_processed: self.documents_processed.load(Ordering::Relaxed),
            units_extracted: self.units_extracted.load(Ordering::Relaxed),
            error_units: self.error_units.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of extraction counters used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of batches completed since startup.
    pub batches_processed: u64,
    /// Number of documents that went through the pipeline.
    pub documents_processed: u64,
    /// Number of non-error units returned across all batches.
    pub units_extracted: u64,
    /// Number of error units (unsupported formats and failed reads).
    pub error_units: u64,
}
