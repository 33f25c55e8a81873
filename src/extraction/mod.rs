//! Document extraction pipeline: format sniffing, per-format extraction, snippet building, and
//! concurrent batch coordination.

pub mod batch;
pub mod formats;
pub mod router;
pub mod sanitize;
mod service;
pub mod sniff;
pub mod snippet;
pub mod types;

pub use batch::BatchCoordinator;
pub use router::route_document;
pub use service::{ExtractionApi, ExtractionService};
pub use sniff::sniff_format;
pub use snippet::build_snippet;
pub use types::{
    BatchError, BatchResult, ByteSource, Document, ExtractionError, ExtractionFailure,
    ExtractionUnit, FormatTag, RawUnit,
};
