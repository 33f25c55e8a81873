//! Format detection from document identifiers.

use super::types::FormatTag;

/// Derive the format tag from the segment after the last `.` in `id`.
pub fn sniff_format(id: &str) -> FormatTag {
    match id.rsplit_once('.') {
        Some((_, extension)) => FormatTag::from_extension(extension),
        None => FormatTag::Unsupported,
    }
}

/// Lowercased extension reported in unsupported-format messages.
///
/// Identifiers without a dot report the whole identifier.
pub fn reported_extension(id: &str) -> String {
    id.rsplit_once('.')
        .map_or(id, |(_, extension)| extension)
        .to_lowercase()
}
