//! Paginated extraction for PDF documents.

use lopdf::Document;

use crate::extraction::types::{ExtractionFailure, RawUnit};

/// Extract one candidate per page, in page order, numbered from 1.
pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<RawUnit>, ExtractionFailure> {
    let document = Document::load_mem(bytes)?;
    let pages = document.get_pages();
    tracing::debug!(pages = pages.len(), "Loaded PDF");

    let mut units = Vec::with_capacity(pages.len());
    for page_number in pages.into_keys() {
        let text = document.extract_text(&[page_number])?;
        units.push(RawUnit {
            unit_index: page_number,
            text,
        });
    }
    Ok(units)
}
