//! Upload filename sanitization used before documents reach the extraction core.

use unicode_normalization::UnicodeNormalization;

/// Reduce an uploaded filename to a safe, flat identifier.
///
/// Keeps only the final path component, folds it to ASCII through NFKD decomposition (so `é`
/// becomes `e`), replaces whitespace with `_`, drops every character outside `[A-Za-z0-9._-]`,
/// and strips leading/trailing `.` and `_`. Returns `None` when nothing usable remains.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let folded: String = base.nfkd().filter(char::is_ascii).collect();
    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join("_");
    let filtered: String = collapsed
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'))
        .collect();
    let trimmed = filtered.trim_matches(|ch| ch == '.' || ch == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
