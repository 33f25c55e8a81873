//! Plain and delimited text extraction (`.txt`, `.csv`).

use crate::extraction::types::{ExtractionFailure, RawUnit};

const BOM: char = '\u{feff}';

/// Decode the bytes as UTF-8 into a single candidate.
///
/// Invalid sequences are replaced with U+FFFD and never fail the document. Windows line endings
/// are normalized and a leading byte-order mark is dropped.
pub fn extract_text(bytes: &[u8]) -> Result<Vec<RawUnit>, ExtractionFailure> {
    let decoded = String::from_utf8_lossy(bytes);
    let text = decoded
        .strip_prefix(BOM)
        .unwrap_or(&*decoded)
        .replace("\r\n", "\n");
    Ok(vec![RawUnit::whole(text)])
}
