//! Routes a document to the extractor for its format and normalizes every outcome into units.

use crate::config::ExtractionConfig;

use super::formats::{extract_docx, extract_pdf, extract_text, extract_xlsx};
use super::sniff::reported_extension;
use super::snippet::finish_units;
use super::types::{
    ByteSource, Document, ExtractionError, ExtractionFailure, ExtractionUnit, FormatTag, RawUnit,
};

/// Extract one document, converting every failure into a single error unit.
///
/// Exactly one of three shapes is returned: content units (possibly none), one unsupported-format
/// unit, or one failure unit.
pub fn route_document(document: Document, config: &ExtractionConfig) -> Vec<ExtractionUnit> {
    let (id, source, format) = document.into_parts();
    match run_extractor(&id, source, format, config) {
        Ok(raw_units) => {
            let units = finish_units(raw_units, config.snippet_chars);
            tracing::debug!(document = %id, %format, units = units.len(), "Document extracted");
            units
        }
        Err(err) => {
            tracing::warn!(
                document = %id,
                %format,
                error = %err,
                "Document produced an error unit"
            );
            vec![ExtractionUnit::error(&err)]
        }
    }
}

fn run_extractor(
    id: &str,
    source: ByteSource,
    format: FormatTag,
    config: &ExtractionConfig,
) -> Result<Vec<RawUnit>, ExtractionError> {
    if !config.allows(format) {
        return Err(ExtractionError::UnsupportedFormat {
            extension: reported_extension(id),
        });
    }

    let extractor: fn(&[u8]) -> Result<Vec<RawUnit>, ExtractionFailure> = match format {
        FormatTag::Pdf => extract_pdf,
        FormatTag::Docx => extract_docx,
        FormatTag::PlainText | FormatTag::Tabular => extract_text,
        FormatTag::Spreadsheet => extract_xlsx,
        FormatTag::Unsupported => {
            return Err(ExtractionError::UnsupportedFormat {
                extension: reported_extension(id),
            });
        }
    };

    let bytes = source.read().map_err(ExtractionFailure::from)?;
    Ok(extractor(&bytes)?)
}
