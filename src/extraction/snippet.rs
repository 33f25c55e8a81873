//! Snippet normalization: trim, drop empties, and bound the preview length.

use super::types::{ExtractionUnit, RawUnit};

/// Trim `raw` and keep at most `max_chars` characters.
///
/// Returns `None` when nothing but whitespace remains, signalling the unit should be dropped.
/// Truncation counts `char`s, so multi-byte sequences are never split.
pub fn build_snippet(raw: &str, max_chars: usize) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => Some(trimmed[..cut].to_string()),
        None => Some(trimmed.to_string()),
    }
}

/// Turn extractor candidates into reportable units, dropping blank ones.
pub(crate) fn finish_units(raw_units: Vec<RawUnit>, max_chars: usize) -> Vec<ExtractionUnit> {
    raw_units
        .into_iter()
        .filter_map(|raw| {
            build_snippet(&raw.text, max_chars)
                .map(|snippet| ExtractionUnit::content(raw.unit_index, snippet))
        })
        .collect()
}
