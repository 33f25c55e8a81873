//! Per-format extractors.
//!
//! Each extractor maps raw document bytes to [`RawUnit`](super::types::RawUnit) candidates.
//! Candidates are untrimmed; blank ones are dropped later by the snippet builder.

pub mod docx;
pub mod pdf;
pub mod text;
pub mod xlsx;

pub use docx::extract_docx;
pub use pdf::extract_pdf;
pub use text::extract_text;
pub use xlsx::extract_xlsx;
